use super::repository::CatalogRepository;
use crate::models::{Artifact, Model3d};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
    Collection,
};
use serde::de::DeserializeOwned;
use service_core::db::{word_filter, MongoDb};
use service_core::error::AppError;
use service_core::extract::Page;

const MODELS: &str = "models_3d";
const ARTIFACTS: &str = "artifacts";

#[derive(Clone)]
pub struct CatalogDb {
    db: MongoDb,
}

impl CatalogDb {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    fn models(&self) -> Collection<Model3d> {
        self.db.collection(MODELS)
    }

    fn artifacts(&self) -> Collection<Artifact> {
        self.db.collection(ARTIFACTS)
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for model-service");

        for collection in [MODELS, ARTIFACTS] {
            self.db
                .ensure_index(
                    collection,
                    doc! { "category": 1, "name": 1 },
                    "category_name_idx",
                    false,
                )
                .await?;
        }
        self.db
            .ensure_index(ARTIFACTS, doc! { "model_id": 1 }, "model_id_idx", false)
            .await?;

        tracing::info!("Successfully created catalogue indexes");
        Ok(())
    }
}

fn category_filter(category: Option<&str>) -> Document {
    match category {
        Some(category) => word_filter("category", category, false),
        None => doc! {},
    }
}

async fn list<T>(
    collection: Collection<T>,
    category: Option<&str>,
    page: Page,
) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let options = FindOptions::builder()
        .sort(doc! { "name": 1 })
        .skip(page.offset)
        .limit(page.limit)
        .build();

    let cursor = collection
        .find(category_filter(category), options)
        .await
        .map_err(|e| {
            tracing::error!(collection = collection.name(), "Failed to list catalogue: {}", e);
            AppError::from(e)
        })?;
    cursor.try_collect().await.map_err(AppError::from)
}

#[async_trait]
impl CatalogRepository for CatalogDb {
    async fn insert_model(&self, model: &Model3d) -> Result<(), AppError> {
        self.models().insert_one(model, None).await.map_err(|e| {
            tracing::error!("Failed to insert model {}: {}", model.id, e);
            AppError::from(e)
        })?;
        Ok(())
    }

    async fn list_models(&self, category: Option<&str>, page: Page) -> Result<Vec<Model3d>, AppError> {
        list(self.models(), category, page).await
    }

    async fn find_model(&self, id: &str) -> Result<Option<Model3d>, AppError> {
        self.models()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)
    }

    async fn delete_model(&self, id: &str) -> Result<bool, AppError> {
        let result = self
            .models()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)?;
        Ok(result.deleted_count > 0)
    }

    async fn insert_artifact(&self, artifact: &Artifact) -> Result<(), AppError> {
        self.artifacts().insert_one(artifact, None).await.map_err(|e| {
            tracing::error!("Failed to insert artifact {}: {}", artifact.id, e);
            AppError::from(e)
        })?;
        Ok(())
    }

    async fn list_artifacts(
        &self,
        category: Option<&str>,
        page: Page,
    ) -> Result<Vec<Artifact>, AppError> {
        list(self.artifacts(), category, page).await
    }

    async fn find_artifact(&self, id: &str) -> Result<Option<Artifact>, AppError> {
        self.artifacts()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)
    }

    async fn delete_artifact(&self, id: &str) -> Result<bool, AppError> {
        let result = self
            .artifacts()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)?;
        Ok(result.deleted_count > 0)
    }

    async fn model_in_use(&self, model_id: &str) -> Result<bool, AppError> {
        let linked = self
            .artifacts()
            .count_documents(doc! { "model_id": model_id }, None)
            .await
            .map_err(AppError::from)?;
        Ok(linked > 0)
    }
}
