use crate::config::{ProviderKind, TranslatorConfig};
use crate::handlers;
use crate::services::{
    GoogleTranslateProvider, HistoryClient, HttpDictionaryClient, HttpHistoryClient,
    MockTranslationProvider, TranslationProvider, Translator,
};
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::server::{Application, ServiceInfo};
use std::sync::Arc;

pub const SERVICE: ServiceInfo = ServiceInfo::new("translator-service", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<Translator>,
    pub history: Arc<dyn HistoryClient>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/translate", post(handlers::translate))
        .route("/api/translate/languages", get(handlers::list_languages))
        .with_state(state)
}

/// Wires the HTTP clients for the configured upstreams.
pub async fn build(config: TranslatorConfig) -> Result<Application, AppError> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

    let provider: Arc<dyn TranslationProvider> = match config.provider {
        ProviderKind::Google => Arc::new(GoogleTranslateProvider::new(
            client.clone(),
            config.translation_api_url.clone(),
            config.timeout,
        )),
        ProviderKind::Mock => Arc::new(MockTranslationProvider::new()),
    };
    tracing::info!(
        provider = %config.provider,
        dictionary = %config.dictionary_url,
        history = %config.history_url,
        "Translation upstreams configured"
    );

    let dictionary = Arc::new(HttpDictionaryClient::new(
        client.clone(),
        config.dictionary_url.clone(),
    ));
    let history = Arc::new(HttpHistoryClient::new(client, config.history_url.clone()));

    build_with(config, Translator::new(provider, dictionary), history).await
}

pub async fn build_with(
    config: TranslatorConfig,
    translator: Translator,
    history: Arc<dyn HistoryClient>,
) -> Result<Application, AppError> {
    let state = AppState {
        translator: Arc::new(translator),
        history,
    };

    // No store of its own, so there is nothing for /ready to check.
    Application::builder(SERVICE)
        .routes(router(state))
        .bind(&config.common)
        .await
}
