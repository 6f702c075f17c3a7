use crate::models::Mistake;
use crate::services::CategoryCounts;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use service_core::extract::{not_blank, optional_text, Page, QueryParams, ValidatedJson};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RecordMistakeRequest {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub learner_id: String,
    #[validate(length(max = 100))]
    pub exercise_id: Option<String>,
    #[validate(length(min = 1, max = 2000), custom(function = "not_blank"))]
    pub expected: String,
    #[validate(length(min = 1, max = 2000), custom(function = "not_blank"))]
    pub submitted: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MistakeResponse {
    pub id: String,
    pub learner_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_id: Option<String>,
    pub expected: String,
    pub submitted: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<Mistake> for MistakeResponse {
    fn from(m: Mistake) -> Self {
        Self {
            id: m.id,
            learner_id: m.learner_id,
            exercise_id: m.exercise_id,
            expected: m.expected,
            submitted: m.submitted,
            category: m.category,
            confidence: m.confidence,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListMistakesQuery {
    pub learner_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListMistakesResponse {
    pub mistakes: Vec<MistakeResponse>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub learner_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub learner_id: Option<String>,
    pub total: u64,
    pub categories: CategoryCounts,
}

/// Stores a learner mistake, tagged with the classifier's label for the
/// submitted text when a classifier is loaded.
#[tracing::instrument(skip(state, request))]
pub async fn record_mistake(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RecordMistakeRequest>,
) -> Result<(StatusCode, Json<MistakeResponse>), AppError> {
    let mut mistake = Mistake::new(
        request.learner_id.trim().to_string(),
        request.expected.trim().to_string(),
        request.submitted.trim().to_string(),
    );
    mistake.exercise_id = optional_text(request.exercise_id);

    if let Some(classifier) = &state.classifier {
        let prediction = classifier.classify(&mistake.submitted);
        mistake.category = prediction.label;
        mistake.confidence = Some(prediction.confidence);
    }

    state.repository.insert(&mistake).await?;

    counter!("learning_mistakes_total", "category" => mistake.category.clone()).increment(1);
    tracing::info!(mistake_id = %mistake.id, category = %mistake.category, "Mistake recorded");

    Ok((StatusCode::CREATED, Json(mistake.into())))
}

#[tracing::instrument(skip(state))]
pub async fn list_mistakes(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListMistakesQuery>,
) -> Result<Json<ListMistakesResponse>, AppError> {
    let learner_id = optional_text(query.learner_id);
    let page = Page::new(query.limit, query.offset);

    let mistakes: Vec<MistakeResponse> = state
        .repository
        .list(learner_id.as_deref(), page)
        .await?
        .into_iter()
        .map(MistakeResponse::from)
        .collect();

    Ok(Json(ListMistakesResponse {
        count: mistakes.len(),
        mistakes,
    }))
}

#[tracing::instrument(skip(state))]
pub async fn summarize_mistakes(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SummaryQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    let learner_id = optional_text(query.learner_id);
    let categories = state.repository.summarize(learner_id.as_deref()).await?;

    Ok(Json(SummaryResponse {
        total: categories.values().sum(),
        learner_id,
        categories,
    }))
}
