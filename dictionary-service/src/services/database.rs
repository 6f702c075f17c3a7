use super::repository::DictionaryRepository;
use crate::models::{DictionaryEntry, WordLanguage};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOneOptions, FindOptions},
    Collection,
};
use service_core::db::{is_duplicate_key, word_filter, MongoDb};
use service_core::error::AppError;
use service_core::extract::Page;

const COLLECTION: &str = "dictionary";

#[derive(Clone)]
pub struct DictionaryDb {
    db: MongoDb,
}

impl DictionaryDb {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &MongoDb {
        &self.db
    }

    fn entries(&self) -> Collection<DictionaryEntry> {
        self.db.collection(COLLECTION)
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for dictionary-service");

        self.db
            .ensure_index(
                COLLECTION,
                doc! { "vedda_word": 1, "english_word": 1 },
                "vedda_english_unique",
                true,
            )
            .await?;
        self.db
            .ensure_index(COLLECTION, doc! { "english_word": 1 }, "english_word_idx", false)
            .await?;
        self.db
            .ensure_index(COLLECTION, doc! { "sinhala_word": 1 }, "sinhala_word_idx", false)
            .await?;

        tracing::info!("Successfully created dictionary indexes");
        Ok(())
    }
}

fn sort_by(language: WordLanguage) -> Document {
    let mut sort = Document::new();
    sort.insert(language.field(), 1);
    sort
}

#[async_trait]
impl DictionaryRepository for DictionaryDb {
    async fn insert(&self, entry: &DictionaryEntry) -> Result<(), AppError> {
        self.entries().insert_one(entry, None).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::Conflict(anyhow::anyhow!(
                    "Entry '{}' -> '{}' already exists",
                    entry.vedda_word,
                    entry.english_word
                ))
            } else {
                tracing::error!("Failed to insert dictionary entry: {}", e);
                AppError::from(e)
            }
        })?;
        Ok(())
    }

    async fn find_word(
        &self,
        word: &str,
        language: WordLanguage,
    ) -> Result<Option<DictionaryEntry>, AppError> {
        // Several entries may share a word; the oldest wins.
        let options = FindOneOptions::builder()
            .sort(doc! { "created_at": 1 })
            .build();

        self.entries()
            .find_one(word_filter(language.field(), word, false), options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up word: {}", e);
                AppError::from(e)
            })
    }

    async fn search_prefix(
        &self,
        prefix: &str,
        language: WordLanguage,
        page: Page,
    ) -> Result<Vec<DictionaryEntry>, AppError> {
        let options = FindOptions::builder()
            .sort(sort_by(language))
            .skip(page.offset)
            .limit(page.limit)
            .build();

        let cursor = self
            .entries()
            .find(word_filter(language.field(), prefix, true), options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to search dictionary: {}", e);
                AppError::from(e)
            })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect dictionary entries: {}", e);
            AppError::from(e)
        })
    }
}
