use crate::dtos::{CatalogQuery, CreateModelRequest, ModelListResponse, ModelResponse};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::extract::{optional_text, Page, QueryParams, ValidatedJson};

#[tracing::instrument(skip(state, request))]
pub async fn create_model(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateModelRequest>,
) -> Result<(StatusCode, Json<ModelResponse>), AppError> {
    let model = request.into_model();
    state.repository.insert_model(&model).await?;

    tracing::info!(model_id = %model.id, format = %model.format, "3D model registered");
    Ok((StatusCode::CREATED, Json(model.into())))
}

#[tracing::instrument(skip(state))]
pub async fn list_models(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CatalogQuery>,
) -> Result<Json<ModelListResponse>, AppError> {
    let category = optional_text(query.category);
    let page = Page::new(query.limit, query.offset);

    let models: Vec<ModelResponse> = state
        .repository
        .list_models(category.as_deref(), page)
        .await?
        .into_iter()
        .map(ModelResponse::from)
        .collect();

    Ok(Json(ModelListResponse {
        count: models.len(),
        models,
    }))
}

#[tracing::instrument(skip(state))]
pub async fn get_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ModelResponse>, AppError> {
    state
        .repository
        .find_model(&id)
        .await?
        .map(|model| Json(model.into()))
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Model not found: {}", id)))
}

/// Models still linked from an artifact cannot be removed.
#[tracing::instrument(skip(state))]
pub async fn delete_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.repository.model_in_use(&id).await? {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Model {} is referenced by at least one artifact",
            id
        )));
    }

    if !state.repository.delete_model(&id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("Model not found: {}", id)));
    }

    tracing::info!(model_id = %id, "3D model deleted");
    Ok(StatusCode::NO_CONTENT)
}
