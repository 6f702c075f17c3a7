use super::repository::HistoryRepository;
use crate::models::HistoryEntry;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use service_core::extract::Page;
use service_core::store::MemoryCollection;

#[derive(Default)]
pub struct InMemoryHistory {
    entries: MemoryCollection<HistoryEntry>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistory {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), AppError> {
        self.entries.insert(entry.clone());
        Ok(())
    }

    async fn list(&self, page: Page) -> Result<Vec<HistoryEntry>, AppError> {
        Ok(self
            .entries
            .find(|_| true, page.offset_usize(), page.limit_usize()))
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<HistoryEntry>, AppError> {
        Ok(self.entries.find_one(|e| e.id == id))
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        Ok(self.entries.remove(|e| e.id == id).is_some())
    }
}
