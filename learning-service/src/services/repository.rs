use crate::models::Mistake;
use async_trait::async_trait;
use service_core::error::AppError;
use service_core::extract::Page;
use std::collections::BTreeMap;

pub type CategoryCounts = BTreeMap<String, u64>;

#[async_trait]
pub trait MistakeRepository: Send + Sync {
    async fn insert(&self, mistake: &Mistake) -> Result<(), AppError>;

    /// Newest first, optionally restricted to one learner.
    async fn list(&self, learner_id: Option<&str>, page: Page) -> Result<Vec<Mistake>, AppError>;

    /// Mistake count per category.
    async fn summarize(&self, learner_id: Option<&str>) -> Result<CategoryCounts, AppError>;
}
