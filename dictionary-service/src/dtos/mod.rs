use crate::models::{DictionaryEntry, WordLanguage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::extract::{not_blank, optional_text};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    #[validate(
        length(min = 1, max = 100, message = "vedda_word must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub vedda_word: String,
    #[validate(
        length(min = 1, max = 100, message = "english_word must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub english_word: String,
    #[validate(length(max = 100))]
    pub sinhala_word: Option<String>,
    #[validate(length(max = 100))]
    pub vedda_ipa: Option<String>,
    #[validate(length(max = 100))]
    pub english_ipa: Option<String>,
    #[validate(length(max = 100))]
    pub sinhala_ipa: Option<String>,
    #[validate(length(max = 50))]
    pub word_type: Option<String>,
    #[validate(length(max = 500))]
    pub usage_example: Option<String>,
}

impl CreateEntryRequest {
    pub fn into_entry(self) -> DictionaryEntry {
        let mut entry = DictionaryEntry::new(
            self.vedda_word.trim().to_string(),
            self.english_word.trim().to_string(),
        );
        entry.sinhala_word = optional_text(self.sinhala_word);
        entry.vedda_ipa = optional_text(self.vedda_ipa);
        entry.english_ipa = optional_text(self.english_ipa);
        entry.sinhala_ipa = optional_text(self.sinhala_ipa);
        entry.word_type = optional_text(self.word_type);
        entry.usage_example = optional_text(self.usage_example);
        entry
    }
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub word: Option<String>,
    #[serde(default)]
    pub from: WordLanguage,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    #[serde(default)]
    pub from: WordLanguage,
    pub limit: Option<i64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntryResponse {
    pub id: String,
    pub vedda_word: String,
    pub english_word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sinhala_word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vedda_ipa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english_ipa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sinhala_ipa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_example: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DictionaryEntry> for EntryResponse {
    fn from(entry: DictionaryEntry) -> Self {
        Self {
            id: entry.id,
            vedda_word: entry.vedda_word,
            english_word: entry.english_word,
            sinhala_word: entry.sinhala_word,
            vedda_ipa: entry.vedda_ipa,
            english_ipa: entry.english_ipa,
            sinhala_ipa: entry.sinhala_ipa,
            word_type: entry.word_type,
            usage_example: entry.usage_example,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntryListResponse {
    pub entries: Vec<EntryResponse>,
    pub count: usize,
}
