use crate::error::AppError;
use crate::observability::render_metrics;
use async_trait::async_trait;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Identity reported by the health routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl ServiceInfo {
    pub const fn new(name: &'static str, version: &'static str) -> Self {
        Self { name, version }
    }
}

/// Dependency check behind `GET /ready`.
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    async fn ready(&self) -> Result<(), AppError>;
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Clone)]
pub(crate) struct HealthState {
    pub info: ServiceInfo,
    pub readiness: Option<Arc<dyn ReadinessCheck>>,
}

/// Liveness: answers without consulting any dependency.
pub(crate) async fn health_check(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.info.name.to_string(),
        version: state.info.version.to_string(),
    })
}

pub(crate) async fn readiness_check(State(state): State<HealthState>) -> impl IntoResponse {
    let result = match &state.readiness {
        Some(check) => check.ready().await,
        None => Ok(()),
    };

    match result {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::warn!(service = state.info.name, error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

pub(crate) async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        render_metrics(),
    )
}
