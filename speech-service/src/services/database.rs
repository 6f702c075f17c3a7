use super::repository::RecordingRepository;
use crate::models::AudioRecording;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::FindOptions, Collection};
use service_core::db::{word_filter, MongoDb};
use service_core::error::AppError;
use service_core::extract::Page;

const COLLECTION: &str = "audio_recordings";

#[derive(Clone)]
pub struct RecordingDb {
    db: MongoDb,
}

impl RecordingDb {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    fn recordings(&self) -> Collection<AudioRecording> {
        self.db.collection(COLLECTION)
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for speech-service");

        self.db
            .ensure_index(COLLECTION, doc! { "word": 1 }, "word_idx", false)
            .await?;
        self.db
            .ensure_index(COLLECTION, doc! { "created_at": -1 }, "created_at_idx", false)
            .await?;

        tracing::info!("Successfully created speech indexes");
        Ok(())
    }
}

#[async_trait]
impl RecordingRepository for RecordingDb {
    async fn insert(&self, recording: &AudioRecording) -> Result<(), AppError> {
        self.recordings()
            .insert_one(recording, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert recording {}: {}", recording.id, e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn list(&self, word: Option<&str>, page: Page) -> Result<Vec<AudioRecording>, AppError> {
        let filter = match word {
            Some(word) => word_filter("word", word, false),
            None => doc! {},
        };
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(page.offset)
            .limit(page.limit)
            .build();

        let cursor = self.recordings().find(filter, options).await.map_err(|e| {
            tracing::error!("Failed to list recordings: {}", e);
            AppError::from(e)
        })?;
        cursor.try_collect().await.map_err(AppError::from)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AudioRecording>, AppError> {
        self.recordings()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, id: &str) -> Result<Option<AudioRecording>, AppError> {
        self.recordings()
            .find_one_and_delete(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete recording {}: {}", id, e);
                AppError::from(e)
            })
    }
}
