use crate::analysis::AudioStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioRecording {
    #[serde(rename = "_id")]
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub storage_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<AudioStats>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl AudioRecording {
    /// New record whose storage key is derived from its id.
    pub fn new(file_name: String, content_type: String, size_bytes: i64, extension: &str) -> Self {
        let id = Uuid::new_v4().to_string();
        Self {
            storage_key: format!("{}.{}", id, extension),
            id,
            file_name,
            content_type,
            size_bytes,
            word: None,
            language: None,
            speaker: None,
            stats: None,
            created_at: Utc::now(),
        }
    }
}
