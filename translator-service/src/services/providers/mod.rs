//! External translation backends.
//!
//! A provider only ever sees languages with API support; Vedda is resolved
//! through the dictionary before a provider is called.

pub mod google;
pub mod mock;

pub use google::GoogleTranslateProvider;
pub use mock::MockTranslationProvider;

use super::UpstreamError;
use crate::models::Language;
use async_trait::async_trait;

#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short name used in logs and metrics.
    fn name(&self) -> &'static str;

    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, UpstreamError>;
}
