use crate::models::{Artifact, Model3d};
use async_trait::async_trait;
use service_core::error::AppError;
use service_core::extract::Page;

/// Storage for both catalogue collections. Lists are ordered by name and
/// `category` matches case-insensitively.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn insert_model(&self, model: &Model3d) -> Result<(), AppError>;
    async fn list_models(&self, category: Option<&str>, page: Page) -> Result<Vec<Model3d>, AppError>;
    async fn find_model(&self, id: &str) -> Result<Option<Model3d>, AppError>;
    async fn delete_model(&self, id: &str) -> Result<bool, AppError>;

    async fn insert_artifact(&self, artifact: &Artifact) -> Result<(), AppError>;
    async fn list_artifacts(
        &self,
        category: Option<&str>,
        page: Page,
    ) -> Result<Vec<Artifact>, AppError>;
    async fn find_artifact(&self, id: &str) -> Result<Option<Artifact>, AppError>;
    async fn delete_artifact(&self, id: &str) -> Result<bool, AppError>;

    /// Whether any artifact links to `model_id`.
    async fn model_in_use(&self, model_id: &str) -> Result<bool, AppError>;
}
