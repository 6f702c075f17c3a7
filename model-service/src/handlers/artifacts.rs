use crate::dtos::{ArtifactListResponse, ArtifactResponse, CatalogQuery, CreateArtifactRequest};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::extract::{optional_text, Page, QueryParams, ValidatedJson};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

fn unknown_model(model_id: &str) -> AppError {
    let mut error = ValidationError::new("unknown_model");
    error.message = Some(Cow::Owned(format!("model '{}' does not exist", model_id)));
    let mut errors = ValidationErrors::new();
    errors.add("model_id", error);
    AppError::ValidationError(errors)
}

#[tracing::instrument(skip(state, request))]
pub async fn create_artifact(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateArtifactRequest>,
) -> Result<(StatusCode, Json<ArtifactResponse>), AppError> {
    let artifact = request.into_artifact();

    if let Some(model_id) = &artifact.model_id {
        if state.repository.find_model(model_id).await?.is_none() {
            return Err(unknown_model(model_id));
        }
    }

    state.repository.insert_artifact(&artifact).await?;

    tracing::info!(
        artifact_id = %artifact.id,
        model_id = artifact.model_id.as_deref().unwrap_or("-"),
        "Artifact registered"
    );
    Ok((StatusCode::CREATED, Json(artifact.into())))
}

#[tracing::instrument(skip(state))]
pub async fn list_artifacts(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CatalogQuery>,
) -> Result<Json<ArtifactListResponse>, AppError> {
    let category = optional_text(query.category);
    let page = Page::new(query.limit, query.offset);

    let artifacts: Vec<ArtifactResponse> = state
        .repository
        .list_artifacts(category.as_deref(), page)
        .await?
        .into_iter()
        .map(ArtifactResponse::from)
        .collect();

    Ok(Json(ArtifactListResponse {
        count: artifacts.len(),
        artifacts,
    }))
}

#[tracing::instrument(skip(state))]
pub async fn get_artifact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArtifactResponse>, AppError> {
    state
        .repository
        .find_artifact(&id)
        .await?
        .map(|artifact| Json(artifact.into()))
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Artifact not found: {}", id)))
}

#[tracing::instrument(skip(state))]
pub async fn delete_artifact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.repository.delete_artifact(&id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("Artifact not found: {}", id)));
    }

    tracing::info!(artifact_id = %id, "Artifact deleted");
    Ok(StatusCode::NO_CONTENT)
}
