pub mod clients;
pub mod metrics;
pub mod providers;
pub mod translation;

pub use clients::{
    DictionaryClient, DictionaryWord, HistoryClient, HistoryRecord, HttpDictionaryClient,
    HttpHistoryClient,
};
pub use providers::{GoogleTranslateProvider, MockTranslationProvider, TranslationProvider};
pub use translation::{Translation, TranslationMethod, Translator};

use service_core::error::AppError;
use thiserror::Error;

/// Failure talking to another HTTP service.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{0} timed out")]
    Timeout(String),

    #[error("{0} is unreachable: {1}")]
    Unreachable(String, String),

    #[error("{0} returned status {1}")]
    Status(String, u16),

    #[error("{0} returned a malformed response: {1}")]
    Malformed(String, String),
}

impl UpstreamError {
    /// Classifies a transport error from `reqwest`.
    pub fn from_reqwest(upstream: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout(upstream.to_string())
        } else if err.is_decode() {
            UpstreamError::Malformed(upstream.to_string(), err.to_string())
        } else {
            UpstreamError::Unreachable(upstream.to_string(), err.to_string())
        }
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Timeout(_) => AppError::GatewayTimeout(err.to_string()),
            _ => AppError::BadGateway(err.to_string()),
        }
    }
}
