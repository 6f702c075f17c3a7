use crate::config::SpeechConfig;
use crate::handlers;
use crate::services::{LocalStorage, RecordingDb, RecordingRepository, Storage};
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use service_core::db::MongoDb;
use service_core::error::AppError;
use service_core::server::{Application, ReadinessCheck, ServiceInfo};
use std::sync::Arc;

pub const SERVICE: ServiceInfo = ServiceInfo::new("speech-service", env!("CARGO_PKG_VERSION"));

/// Room for multipart boundaries and the text fields around the file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn RecordingRepository>,
    pub storage: Arc<dyn Storage>,
    pub max_audio_bytes: usize,
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.max_audio_bytes.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route(
            "/api/speech/recordings",
            get(handlers::list_recordings)
                .post(handlers::upload_recording)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            "/api/speech/recordings/:id",
            get(handlers::get_recording).delete(handlers::delete_recording),
        )
        .route("/api/speech/recordings/:id/audio", get(handlers::download_audio))
        .with_state(state)
}

pub async fn build(config: SpeechConfig) -> Result<Application, AppError> {
    let db = MongoDb::connect(&config.mongodb, SERVICE.name).await?;
    let recordings = RecordingDb::new(db.clone());
    recordings.initialize_indexes().await.map_err(|e| {
        tracing::error!("Failed to initialize database indexes: {}", e);
        e
    })?;

    let storage = LocalStorage::new(&config.storage_path).await.map_err(|e| {
        tracing::error!(
            "Failed to prepare audio storage at {}: {}",
            config.storage_path.display(),
            e
        );
        e
    })?;

    build_with(config, Arc::new(recordings), Arc::new(storage), Some(Arc::new(db))).await
}

pub async fn build_with(
    config: SpeechConfig,
    repository: Arc<dyn RecordingRepository>,
    storage: Arc<dyn Storage>,
    readiness: Option<Arc<dyn ReadinessCheck>>,
) -> Result<Application, AppError> {
    let state = AppState {
        repository,
        storage,
        max_audio_bytes: config.max_audio_bytes,
    };

    let mut builder = Application::builder(SERVICE).routes(router(state));
    if let Some(check) = readiness {
        builder = builder.readiness(check);
    }
    builder.bind(&config.common).await
}
