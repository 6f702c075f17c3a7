use crate::config::LearningConfig;
use crate::handlers;
use crate::services::{load_classifier, MistakeClassifier, MistakeDb, MistakeRepository};
use axum::{
    routing::{get, post},
    Router,
};
use service_core::db::MongoDb;
use service_core::error::AppError;
use service_core::server::{Application, ReadinessCheck, ServiceInfo};
use std::sync::Arc;

pub const SERVICE: ServiceInfo = ServiceInfo::new("learning-service", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn MistakeRepository>,
    pub classifier: Option<MistakeClassifier>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/learning/classify", post(handlers::classify_text))
        .route(
            "/api/learning/mistakes",
            get(handlers::list_mistakes).post(handlers::record_mistake),
        )
        .route(
            "/api/learning/mistakes/summary",
            get(handlers::summarize_mistakes),
        )
        .with_state(state)
}

/// Loads the classifier (if configured) before touching the database, then
/// connects and binds.
pub async fn build(config: LearningConfig) -> Result<Application, AppError> {
    let classifier = match &config.classifier_model_path {
        Some(path) => Some(load_classifier(path)?),
        None => {
            tracing::warn!("CLASSIFIER_MODEL_PATH not set; mistakes will be stored unclassified");
            None
        }
    };

    let db = MongoDb::connect(&config.mongodb, SERVICE.name).await?;
    let mistakes = MistakeDb::new(db.clone());
    mistakes.initialize_indexes().await.map_err(|e| {
        tracing::error!("Failed to initialize database indexes: {}", e);
        e
    })?;

    build_with(config, Arc::new(mistakes), classifier, Some(Arc::new(db))).await
}

pub async fn build_with(
    config: LearningConfig,
    repository: Arc<dyn MistakeRepository>,
    classifier: Option<MistakeClassifier>,
    readiness: Option<Arc<dyn ReadinessCheck>>,
) -> Result<Application, AppError> {
    let state = AppState {
        repository,
        classifier,
    };
    let mut builder = Application::builder(SERVICE).routes(router(state));
    if let Some(check) = readiness {
        builder = builder.readiness(check);
    }
    builder.bind(&config.common).await
}
