use crate::startup::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;
use service_core::error::AppError;
use service_core::extract::{not_blank, ValidatedJson};
use text_classifier::Prediction;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ClassifyRequest {
    #[validate(
        length(min = 1, max = 5000, message = "text must be 1-5000 characters"),
        custom(function = "not_blank")
    )]
    pub text: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn classify_text(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ClassifyRequest>,
) -> Result<Json<Prediction>, AppError> {
    let classifier = state.classifier.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("No classifier model is loaded".to_string())
    })?;

    let prediction = classifier.classify(request.text.trim());

    tracing::debug!(
        label = %prediction.label,
        confidence = prediction.confidence,
        "Text classified"
    );
    Ok(Json(prediction))
}
