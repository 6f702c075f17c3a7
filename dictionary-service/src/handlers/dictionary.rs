use crate::dtos::{CreateEntryRequest, EntryListResponse, EntryResponse, LookupQuery, SearchQuery};
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, Json};
use service_core::error::AppError;
use service_core::extract::{non_blank, Page, QueryParams, ValidatedJson};

#[tracing::instrument(skip(state, request))]
pub async fn create_entry(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateEntryRequest>,
) -> Result<(StatusCode, Json<EntryResponse>), AppError> {
    let entry = request.into_entry();
    state.repository.insert(&entry).await?;

    tracing::info!(
        entry_id = %entry.id,
        vedda_word = %entry.vedda_word,
        english_word = %entry.english_word,
        "Dictionary entry created"
    );

    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[tracing::instrument(skip(state))]
pub async fn lookup_word(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<LookupQuery>,
) -> Result<Json<EntryResponse>, AppError> {
    let word = non_blank("word", query.word.as_deref().unwrap_or_default())?;

    match state.repository.find_word(&word, query.from).await? {
        Some(entry) => Ok(Json(entry.into())),
        None => {
            tracing::debug!(word = %word, from = %query.from, "Word not found");
            Err(AppError::NotFound(anyhow::anyhow!("Word '{}' not found", word)))
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn search_entries(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Result<Json<EntryListResponse>, AppError> {
    let prefix = non_blank("q", query.q.as_deref().unwrap_or_default())?;
    let page = Page::new(query.limit, query.offset);

    let entries: Vec<EntryResponse> = state
        .repository
        .search_prefix(&prefix, query.from, page)
        .await?
        .into_iter()
        .map(EntryResponse::from)
        .collect();

    Ok(Json(EntryListResponse {
        count: entries.len(),
        entries,
    }))
}
