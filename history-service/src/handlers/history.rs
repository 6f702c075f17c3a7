use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::models::HistoryEntry;
use crate::startup::AppState;
use service_core::error::AppError;
use service_core::extract::{not_blank, optional_text, Page, QueryParams, ValidatedJson};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHistoryRequest {
    #[validate(
        length(min = 1, max = 5000, message = "source_text must be 1-5000 characters"),
        custom(function = "not_blank")
    )]
    pub source_text: String,
    #[validate(length(max = 5000, message = "translated_text must be at most 5000 characters"))]
    pub translated_text: String,
    #[validate(length(min = 1, max = 20), custom(function = "not_blank"))]
    pub source_language: String,
    #[validate(length(min = 1, max = 20), custom(function = "not_blank"))]
    pub target_language: String,
    #[validate(length(max = 20))]
    pub method: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub id: String,
    pub source_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub metadata: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
}

impl From<HistoryEntry> for HistoryResponse {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id.to_hex(),
            source_text: entry.source_text,
            translated_text: entry.translated_text,
            source_language: entry.source_language,
            target_language: entry.target_language,
            method: entry.method,
            metadata: entry.metadata,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListHistoryQuery {
    pub limit: Option<i64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListHistoryResponse {
    pub entries: Vec<HistoryResponse>,
    pub count: usize,
}

fn parse_id(raw: &str) -> Result<ObjectId, AppError> {
    Ok(ObjectId::parse_str(raw)?)
}

#[tracing::instrument(skip(state, request))]
pub async fn create_entry(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateHistoryRequest>,
) -> Result<(StatusCode, Json<HistoryResponse>), AppError> {
    let mut entry = HistoryEntry::new(
        request.source_text.trim().to_string(),
        request.translated_text,
        request.source_language.trim().to_lowercase(),
        request.target_language.trim().to_lowercase(),
    );
    entry.method = optional_text(request.method);
    entry.metadata = request.metadata;

    state.repository.append(&entry).await?;

    tracing::info!(
        entry_id = %entry.id,
        source_language = %entry.source_language,
        target_language = %entry.target_language,
        "History entry recorded"
    );

    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[tracing::instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListHistoryQuery>,
) -> Result<Json<ListHistoryResponse>, AppError> {
    let page = Page::new(query.limit, query.offset);
    let entries: Vec<HistoryResponse> = state
        .repository
        .list(page)
        .await?
        .into_iter()
        .map(HistoryResponse::from)
        .collect();

    Ok(Json(ListHistoryResponse {
        count: entries.len(),
        entries,
    }))
}

#[tracing::instrument(skip(state))]
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let id = parse_id(&id)?;

    match state.repository.find_by_id(id).await? {
        Some(entry) => Ok(Json(entry.into())),
        None => Err(AppError::NotFound(anyhow::anyhow!(
            "History entry not found: {}",
            id
        ))),
    }
}

/// Administrative removal; the log is otherwise append-only.
#[tracing::instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;

    if !state.repository.delete(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "History entry not found: {}",
            id
        )));
    }

    tracing::info!(entry_id = %id, "History entry deleted");
    Ok(StatusCode::NO_CONTENT)
}
