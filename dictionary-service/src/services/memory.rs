use super::repository::DictionaryRepository;
use crate::models::{DictionaryEntry, WordLanguage};
use async_trait::async_trait;
use service_core::error::AppError;
use service_core::extract::Page;
use service_core::store::MemoryCollection;

/// Process-local dictionary, used when no document store is wired in.
#[derive(Default)]
pub struct InMemoryDictionary {
    entries: MemoryCollection<DictionaryEntry>,
}

impl InMemoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }
}

fn folded(entry: &DictionaryEntry, language: WordLanguage) -> Option<String> {
    entry.word(language).map(|w| w.to_lowercase())
}

#[async_trait]
impl DictionaryRepository for InMemoryDictionary {
    async fn insert(&self, entry: &DictionaryEntry) -> Result<(), AppError> {
        if !self
            .entries
            .insert_unique(entry.clone(), |existing| existing.same_pair(entry))
        {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Entry '{}' -> '{}' already exists",
                entry.vedda_word,
                entry.english_word
            )));
        }
        Ok(())
    }

    async fn find_word(
        &self,
        word: &str,
        language: WordLanguage,
    ) -> Result<Option<DictionaryEntry>, AppError> {
        let needle = word.trim().to_lowercase();
        Ok(self
            .entries
            .find_one(|e| folded(e, language).as_deref() == Some(needle.as_str())))
    }

    async fn search_prefix(
        &self,
        prefix: &str,
        language: WordLanguage,
        page: Page,
    ) -> Result<Vec<DictionaryEntry>, AppError> {
        let needle = prefix.trim().to_lowercase();
        let mut matches = self.entries.filter(|e| {
            folded(e, language)
                .map(|w| w.starts_with(&needle))
                .unwrap_or(false)
        });
        matches.sort_by(|a, b| a.word(language).cmp(&b.word(language)));

        Ok(matches
            .into_iter()
            .skip(page.offset_usize())
            .take(page.limit_usize())
            .collect())
    }
}
