use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One completed translation. Entries are never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub source_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        source_text: String,
        translated_text: String,
        source_language: String,
        target_language: String,
    ) -> Self {
        Self {
            // ObjectIds from one process increase monotonically, so sorting
            // on `_id` reproduces insertion order.
            id: ObjectId::new(),
            source_text,
            translated_text,
            source_language,
            target_language,
            method: None,
            metadata: HashMap::new(),
            created_at: Utc::now(),
        }
    }
}
