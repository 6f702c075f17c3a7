use super::repository::HistoryRepository;
use crate::models::HistoryEntry;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::FindOptions,
    Collection,
};
use service_core::db::MongoDb;
use service_core::error::AppError;
use service_core::extract::Page;

const COLLECTION: &str = "translation_history";

#[derive(Clone)]
pub struct HistoryDb {
    db: MongoDb,
}

impl HistoryDb {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    fn entries(&self) -> Collection<HistoryEntry> {
        self.db.collection(COLLECTION)
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for history-service");

        self.db
            .ensure_index(COLLECTION, doc! { "created_at": 1 }, "created_at_idx", false)
            .await?;
        self.db
            .ensure_index(
                COLLECTION,
                doc! { "source_language": 1, "target_language": 1 },
                "language_pair_idx",
                false,
            )
            .await?;

        tracing::info!("Successfully created history indexes");
        Ok(())
    }
}

#[async_trait]
impl HistoryRepository for HistoryDb {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), AppError> {
        self.entries().insert_one(entry, None).await.map_err(|e| {
            tracing::error!("Failed to insert history entry: {}", e);
            AppError::from(e)
        })?;
        Ok(())
    }

    async fn list(&self, page: Page) -> Result<Vec<HistoryEntry>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(page.offset)
            .limit(page.limit)
            .build();

        let cursor = self.entries().find(doc! {}, options).await.map_err(|e| {
            tracing::error!("Failed to list history: {}", e);
            AppError::from(e)
        })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect history entries: {}", e);
            AppError::from(e)
        })
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<HistoryEntry>, AppError> {
        self.entries()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find history entry: {}", e);
                AppError::from(e)
            })
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .entries()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete history entry: {}", e);
                AppError::from(e)
            })?;
        Ok(result.deleted_count > 0)
    }
}
