use super::repository::{CategoryCounts, MistakeRepository};
use crate::models::Mistake;
use async_trait::async_trait;
use service_core::error::AppError;
use service_core::extract::Page;
use service_core::store::MemoryCollection;

#[derive(Default)]
pub struct InMemoryMistakes {
    mistakes: MemoryCollection<Mistake>,
}

impl InMemoryMistakes {
    pub fn new() -> Self {
        Self::default()
    }
}

fn belongs_to(learner_id: Option<&str>, mistake: &Mistake) -> bool {
    learner_id.map(|id| mistake.learner_id == id).unwrap_or(true)
}

#[async_trait]
impl MistakeRepository for InMemoryMistakes {
    async fn insert(&self, mistake: &Mistake) -> Result<(), AppError> {
        self.mistakes.insert(mistake.clone());
        Ok(())
    }

    async fn list(&self, learner_id: Option<&str>, page: Page) -> Result<Vec<Mistake>, AppError> {
        let mut matches = self.mistakes.filter(|m| belongs_to(learner_id, m));
        matches.reverse();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches
            .into_iter()
            .skip(page.offset_usize())
            .take(page.limit_usize())
            .collect())
    }

    async fn summarize(&self, learner_id: Option<&str>) -> Result<CategoryCounts, AppError> {
        let mut counts = CategoryCounts::new();
        for mistake in self.mistakes.filter(|m| belongs_to(learner_id, m)) {
            *counts.entry(mistake.category).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
