use crate::models::AudioRecording;
use async_trait::async_trait;
use service_core::error::AppError;
use service_core::extract::Page;

/// Recording metadata. Listing is newest first.
#[async_trait]
pub trait RecordingRepository: Send + Sync {
    async fn insert(&self, recording: &AudioRecording) -> Result<(), AppError>;

    /// `word` matches case-insensitively when given.
    async fn list(&self, word: Option<&str>, page: Page) -> Result<Vec<AudioRecording>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<AudioRecording>, AppError>;

    /// Removes the record and returns it.
    async fn delete(&self, id: &str) -> Result<Option<AudioRecording>, AppError>;
}
