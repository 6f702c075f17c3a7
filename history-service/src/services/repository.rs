use crate::models::HistoryEntry;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use service_core::extract::Page;

/// Append-only translation log. `list` returns entries in insertion order.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), AppError>;

    async fn list(&self, page: Page) -> Result<Vec<HistoryEntry>, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<HistoryEntry>, AppError>;

    /// Returns whether an entry was removed.
    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;
}
