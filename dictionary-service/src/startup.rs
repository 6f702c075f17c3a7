use crate::config::DictionaryConfig;
use crate::handlers;
use crate::services::{DictionaryDb, DictionaryRepository};
use axum::{
    routing::get,
    Router,
};
use service_core::db::MongoDb;
use service_core::error::AppError;
use service_core::server::{Application, ReadinessCheck, ServiceInfo};
use std::sync::Arc;

pub const SERVICE: ServiceInfo = ServiceInfo::new("dictionary-service", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn DictionaryRepository>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/dictionary",
            get(handlers::lookup_word).post(handlers::create_entry),
        )
        .route("/api/dictionary/search", get(handlers::search_entries))
        .with_state(state)
}

/// Connects to MongoDB, prepares indexes and binds the listener.
pub async fn build(config: DictionaryConfig) -> Result<Application, AppError> {
    let db = MongoDb::connect(&config.mongodb, SERVICE.name).await?;
    let dictionary = DictionaryDb::new(db.clone());
    dictionary.initialize_indexes().await.map_err(|e| {
        tracing::error!("Failed to initialize database indexes: {}", e);
        e
    })?;

    build_with_repository(config, Arc::new(dictionary), Some(Arc::new(db))).await
}

pub async fn build_with_repository(
    config: DictionaryConfig,
    repository: Arc<dyn DictionaryRepository>,
    readiness: Option<Arc<dyn ReadinessCheck>>,
) -> Result<Application, AppError> {
    let mut builder = Application::builder(SERVICE).routes(router(AppState { repository }));
    if let Some(check) = readiness {
        builder = builder.readiness(check);
    }
    builder.bind(&config.common).await
}
