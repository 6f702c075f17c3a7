use crate::config::HistoryConfig;
use crate::handlers;
use crate::services::{HistoryDb, HistoryRepository};
use axum::{routing::get, Router};
use service_core::db::MongoDb;
use service_core::error::AppError;
use service_core::server::{Application, ReadinessCheck, ServiceInfo};
use std::sync::Arc;

pub const SERVICE: ServiceInfo = ServiceInfo::new("history-service", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn HistoryRepository>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/history",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route(
            "/api/history/:id",
            get(handlers::get_entry).delete(handlers::delete_entry),
        )
        .with_state(state)
}

pub async fn build(config: HistoryConfig) -> Result<Application, AppError> {
    let db = MongoDb::connect(&config.mongodb, SERVICE.name).await?;
    let history = HistoryDb::new(db.clone());
    history.initialize_indexes().await.map_err(|e| {
        tracing::error!("Failed to initialize database indexes: {}", e);
        e
    })?;

    build_with_repository(config, Arc::new(history), Some(Arc::new(db))).await
}

pub async fn build_with_repository(
    config: HistoryConfig,
    repository: Arc<dyn HistoryRepository>,
    readiness: Option<Arc<dyn ReadinessCheck>>,
) -> Result<Application, AppError> {
    let mut builder = Application::builder(SERVICE).routes(router(AppState { repository }));
    if let Some(check) = readiness {
        builder = builder.readiness(check);
    }
    builder.bind(&config.common).await
}
