use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use validator::{Validate, ValidationError};

use crate::models::{language::LanguageInfo, Language};
use crate::services::{metrics, HistoryRecord};
use crate::startup::AppState;
use service_core::error::AppError;
use service_core::extract::{not_blank, ValidatedJson};
use service_core::observability::extract_request_id;

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "distinct_languages"))]
pub struct TranslateRequest {
    #[validate(
        length(min = 1, max = 5000, message = "text must be 1-5000 characters"),
        custom(function = "not_blank")
    )]
    pub text: String,
    #[validate(custom(function = "supported_language"))]
    pub source_language: String,
    #[validate(custom(function = "supported_language"))]
    pub target_language: String,
    pub record_history: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub method: String,
    pub unknown_words: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageInfo>,
}

fn supported_language(raw: &str) -> Result<(), ValidationError> {
    raw.parse::<Language>().map(|_| ()).map_err(|e| {
        let mut error = ValidationError::new("unsupported_language");
        error.message = Some(Cow::Owned(e));
        error
    })
}

fn distinct_languages(request: &TranslateRequest) -> Result<(), ValidationError> {
    let source = request.source_language.parse::<Language>();
    let target = request.target_language.parse::<Language>();
    if let (Ok(source), Ok(target)) = (source, target) {
        if source == target {
            let mut error = ValidationError::new("same_language");
            error.message = Some(Cow::Borrowed(
                "source_language and target_language must differ",
            ));
            return Err(error);
        }
    }
    Ok(())
}

fn parse_language(field: &str, raw: &str) -> Result<Language, AppError> {
    raw.parse()
        .map_err(|e: String| AppError::BadRequest(anyhow::anyhow!("{}: {}", field, e)))
}

#[tracing::instrument(skip(state, headers, request))]
pub async fn translate(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<TranslateRequest>,
) -> Result<Json<TranslateResponse>, AppError> {
    let request_id = extract_request_id(&headers);
    let text = request.text.trim().to_string();
    let source = parse_language("source_language", &request.source_language)?;
    let target = parse_language("target_language", &request.target_language)?;

    let translation = state
        .translator
        .translate(&text, source, target, request_id.as_deref())
        .await?;
    metrics::record_translation(translation.method);

    tracing::info!(
        source = %source,
        target = %target,
        method = translation.method.as_str(),
        unknown_words = translation.unknown_words.len(),
        "Translation completed"
    );

    if request.record_history.unwrap_or(true) {
        let record = HistoryRecord {
            source_text: text.clone(),
            translated_text: translation.text.clone(),
            source_language: source.code().to_string(),
            target_language: target.code().to_string(),
            method: translation.method.as_str().to_string(),
            metadata: HashMap::from([(
                "provider".to_string(),
                state.translator.provider_name().to_string(),
            )]),
        };
        record_history(&state, &record, request_id.as_deref()).await;
    }

    Ok(Json(TranslateResponse {
        translated_text: translation.text,
        source_language: source.code().to_string(),
        target_language: target.code().to_string(),
        method: translation.method.as_str().to_string(),
        unknown_words: translation.unknown_words,
    }))
}

/// Best effort: a failed append is logged and never fails the translation.
async fn record_history(state: &AppState, record: &HistoryRecord, request_id: Option<&str>) {
    if let Err(e) = state.history.record(record, request_id).await {
        metrics::record_history_failure();
        tracing::warn!(error = %e, "Failed to record translation history");
    }
}

pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: Language::ALL.into_iter().map(LanguageInfo::from).collect(),
    })
}
