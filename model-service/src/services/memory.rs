use super::repository::CatalogRepository;
use crate::models::{Artifact, Model3d};
use async_trait::async_trait;
use service_core::error::AppError;
use service_core::extract::Page;
use service_core::store::MemoryCollection;

#[derive(Default)]
pub struct InMemoryCatalog {
    models: MemoryCollection<Model3d>,
    artifacts: MemoryCollection<Artifact>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Case-insensitive over the full Unicode range, like the Mongo regex filter.
fn same_category(category: Option<&str>, candidate: &str) -> bool {
    category
        .map(|c| c.trim().to_lowercase() == candidate.to_lowercase())
        .unwrap_or(true)
}

fn page_by_name<T>(mut items: Vec<T>, name: impl Fn(&T) -> &str, page: Page) -> Vec<T> {
    items.sort_by(|a, b| name(a).cmp(name(b)));
    items
        .into_iter()
        .skip(page.offset_usize())
        .take(page.limit_usize())
        .collect()
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn insert_model(&self, model: &Model3d) -> Result<(), AppError> {
        self.models.insert(model.clone());
        Ok(())
    }

    async fn list_models(&self, category: Option<&str>, page: Page) -> Result<Vec<Model3d>, AppError> {
        let items = self.models.filter(|m| same_category(category, &m.category));
        Ok(page_by_name(items, |m| m.name.as_str(), page))
    }

    async fn find_model(&self, id: &str) -> Result<Option<Model3d>, AppError> {
        Ok(self.models.find_one(|m| m.id == id))
    }

    async fn delete_model(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.models.remove(|m| m.id == id).is_some())
    }

    async fn insert_artifact(&self, artifact: &Artifact) -> Result<(), AppError> {
        self.artifacts.insert(artifact.clone());
        Ok(())
    }

    async fn list_artifacts(
        &self,
        category: Option<&str>,
        page: Page,
    ) -> Result<Vec<Artifact>, AppError> {
        let items = self.artifacts.filter(|a| same_category(category, &a.category));
        Ok(page_by_name(items, |a| a.name.as_str(), page))
    }

    async fn find_artifact(&self, id: &str) -> Result<Option<Artifact>, AppError> {
        Ok(self.artifacts.find_one(|a| a.id == id))
    }

    async fn delete_artifact(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.artifacts.remove(|a| a.id == id).is_some())
    }

    async fn model_in_use(&self, model_id: &str) -> Result<bool, AppError> {
        Ok(self
            .artifacts
            .any(|a| a.model_id.as_deref() == Some(model_id)))
    }
}
