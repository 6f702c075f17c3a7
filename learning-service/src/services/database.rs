use super::repository::{CategoryCounts, MistakeRepository};
use crate::models::Mistake;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::FindOptions,
    Collection,
};
use service_core::db::MongoDb;
use service_core::error::AppError;
use service_core::extract::Page;

const COLLECTION: &str = "mistakes";

#[derive(Clone)]
pub struct MistakeDb {
    db: MongoDb,
}

impl MistakeDb {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    fn mistakes(&self) -> Collection<Mistake> {
        self.db.collection(COLLECTION)
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for learning-service");

        self.db
            .ensure_index(
                COLLECTION,
                doc! { "learner_id": 1, "created_at": -1 },
                "learner_created_idx",
                false,
            )
            .await?;
        self.db
            .ensure_index(COLLECTION, doc! { "category": 1 }, "category_idx", false)
            .await?;

        tracing::info!("Successfully created learning indexes");
        Ok(())
    }
}

fn learner_filter(learner_id: Option<&str>) -> Document {
    match learner_id {
        Some(learner_id) => doc! { "learner_id": learner_id },
        None => doc! {},
    }
}

fn count_of(value: Option<&Bson>) -> u64 {
    match value {
        Some(Bson::Int32(n)) => u64::try_from(*n).unwrap_or(0),
        Some(Bson::Int64(n)) => u64::try_from(*n).unwrap_or(0),
        _ => 0,
    }
}

#[async_trait]
impl MistakeRepository for MistakeDb {
    async fn insert(&self, mistake: &Mistake) -> Result<(), AppError> {
        self.mistakes().insert_one(mistake, None).await.map_err(|e| {
            tracing::error!("Failed to insert mistake {}: {}", mistake.id, e);
            AppError::from(e)
        })?;
        Ok(())
    }

    async fn list(&self, learner_id: Option<&str>, page: Page) -> Result<Vec<Mistake>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(page.offset)
            .limit(page.limit)
            .build();

        let cursor = self
            .mistakes()
            .find(learner_filter(learner_id), options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list mistakes: {}", e);
                AppError::from(e)
            })?;
        cursor.try_collect().await.map_err(AppError::from)
    }

    async fn summarize(&self, learner_id: Option<&str>) -> Result<CategoryCounts, AppError> {
        let pipeline = vec![
            doc! { "$match": learner_filter(learner_id) },
            doc! { "$group": { "_id": "$category", "count": { "$sum": 1 } } },
        ];

        let mut cursor = self
            .mistakes()
            .aggregate(pipeline, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to summarise mistakes: {}", e);
                AppError::from(e)
            })?;

        let mut counts = CategoryCounts::new();
        while let Some(group) = cursor.try_next().await.map_err(AppError::from)? {
            if let Ok(category) = group.get_str("_id") {
                counts.insert(category.to_string(), count_of(group.get("count")));
            }
        }
        Ok(counts)
    }
}
