//! Deterministic provider for local runs and tests.

use super::TranslationProvider;
use crate::models::Language;
use crate::services::UpstreamError;
use async_trait::async_trait;

#[derive(Default)]
pub struct MockTranslationProvider;

impl MockTranslationProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TranslationProvider for MockTranslationProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, UpstreamError> {
        Ok(format!("[{}->{}] {}", source.code(), target.code(), text))
    }
}
