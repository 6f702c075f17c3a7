use crate::config::ModelConfig;
use crate::handlers;
use crate::services::{CatalogDb, CatalogRepository};
use axum::{routing::get, Router};
use service_core::db::MongoDb;
use service_core::error::AppError;
use service_core::server::{Application, ReadinessCheck, ServiceInfo};
use std::sync::Arc;

pub const SERVICE: ServiceInfo = ServiceInfo::new("model-service", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn CatalogRepository>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/models",
            get(handlers::list_models).post(handlers::create_model),
        )
        .route(
            "/api/models/:id",
            get(handlers::get_model).delete(handlers::delete_model),
        )
        .route(
            "/api/artifacts",
            get(handlers::list_artifacts).post(handlers::create_artifact),
        )
        .route(
            "/api/artifacts/:id",
            get(handlers::get_artifact).delete(handlers::delete_artifact),
        )
        .with_state(state)
}

pub async fn build(config: ModelConfig) -> Result<Application, AppError> {
    let db = MongoDb::connect(&config.mongodb, SERVICE.name).await?;
    let catalog = CatalogDb::new(db.clone());
    catalog.initialize_indexes().await.map_err(|e| {
        tracing::error!("Failed to initialize database indexes: {}", e);
        e
    })?;

    build_with_repository(config, Arc::new(catalog), Some(Arc::new(db))).await
}

pub async fn build_with_repository(
    config: ModelConfig,
    repository: Arc<dyn CatalogRepository>,
    readiness: Option<Arc<dyn ReadinessCheck>>,
) -> Result<Application, AppError> {
    let mut builder = Application::builder(SERVICE).routes(router(AppState { repository }));
    if let Some(check) = readiness {
        builder = builder.readiness(check);
    }
    builder.bind(&config.common).await
}
