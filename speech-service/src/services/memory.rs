use super::repository::RecordingRepository;
use crate::models::AudioRecording;
use async_trait::async_trait;
use service_core::error::AppError;
use service_core::extract::Page;
use service_core::store::MemoryCollection;

#[derive(Default)]
pub struct InMemoryRecordings {
    recordings: MemoryCollection<AudioRecording>,
}

impl InMemoryRecordings {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordingRepository for InMemoryRecordings {
    async fn insert(&self, recording: &AudioRecording) -> Result<(), AppError> {
        self.recordings.insert(recording.clone());
        Ok(())
    }

    async fn list(&self, word: Option<&str>, page: Page) -> Result<Vec<AudioRecording>, AppError> {
        let word = word.map(str::to_lowercase);
        let mut matches = self.recordings.filter(|r| match &word {
            Some(w) => r.word.as_deref().map(str::to_lowercase).as_ref() == Some(w),
            None => true,
        });
        matches.reverse();
        Ok(matches
            .into_iter()
            .skip(page.offset_usize())
            .take(page.limit_usize())
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AudioRecording>, AppError> {
        Ok(self.recordings.find_one(|r| r.id == id))
    }

    async fn delete(&self, id: &str) -> Result<Option<AudioRecording>, AppError> {
        Ok(self.recordings.remove(|r| r.id == id))
    }
}
