use crate::models::{DictionaryEntry, WordLanguage};
use async_trait::async_trait;
use service_core::error::AppError;
use service_core::extract::Page;

/// Storage operations behind the dictionary routes.
///
/// Word matching is case-insensitive on the column selected by `language`.
#[async_trait]
pub trait DictionaryRepository: Send + Sync {
    /// Fails with `Conflict` when the (vedda_word, english_word) pair exists.
    async fn insert(&self, entry: &DictionaryEntry) -> Result<(), AppError>;

    async fn find_word(
        &self,
        word: &str,
        language: WordLanguage,
    ) -> Result<Option<DictionaryEntry>, AppError>;

    /// Entries whose word starts with `prefix`, ordered by that word.
    async fn search_prefix(
        &self,
        prefix: &str,
        language: WordLanguage,
        page: Page,
    ) -> Result<Vec<DictionaryEntry>, AppError>;
}
