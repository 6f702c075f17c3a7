use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category stored when no classifier is loaded.
pub const UNCLASSIFIED: &str = "unclassified";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mistake {
    #[serde(rename = "_id")]
    pub id: String,
    pub learner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_id: Option<String>,
    pub expected: String,
    pub submitted: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Mistake {
    pub fn new(learner_id: String, expected: String, submitted: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            learner_id,
            exercise_id: None,
            expected,
            submitted,
            category: UNCLASSIFIED.to_string(),
            confidence: None,
            created_at: Utc::now(),
        }
    }
}
