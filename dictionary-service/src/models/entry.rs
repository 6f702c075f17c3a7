use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Language column a lookup is keyed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordLanguage {
    #[default]
    #[serde(alias = "ved")]
    Vedda,
    #[serde(alias = "en")]
    English,
    #[serde(alias = "si")]
    Sinhala,
}

impl WordLanguage {
    pub fn field(&self) -> &'static str {
        match self {
            WordLanguage::Vedda => "vedda_word",
            WordLanguage::English => "english_word",
            WordLanguage::Sinhala => "sinhala_word",
        }
    }
}

impl fmt::Display for WordLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordLanguage::Vedda => write!(f, "vedda"),
            WordLanguage::English => write!(f, "english"),
            WordLanguage::Sinhala => write!(f, "sinhala"),
        }
    }
}

impl FromStr for WordLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vedda" | "ved" => Ok(WordLanguage::Vedda),
            "english" | "en" => Ok(WordLanguage::English),
            "sinhala" | "si" => Ok(WordLanguage::Sinhala),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub vedda_word: String,
    pub english_word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sinhala_word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vedda_ipa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_ipa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sinhala_ipa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_example: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl DictionaryEntry {
    pub fn new(vedda_word: String, english_word: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vedda_word,
            english_word,
            sinhala_word: None,
            vedda_ipa: None,
            english_ipa: None,
            sinhala_ipa: None,
            word_type: None,
            usage_example: None,
            created_at: Utc::now(),
        }
    }

    pub fn word(&self, language: WordLanguage) -> Option<&str> {
        match language {
            WordLanguage::Vedda => Some(&self.vedda_word),
            WordLanguage::English => Some(&self.english_word),
            WordLanguage::Sinhala => self.sinhala_word.as_deref(),
        }
    }

    pub fn same_pair(&self, other: &DictionaryEntry) -> bool {
        self.vedda_word == other.vedda_word && self.english_word == other.english_word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_names_and_codes() {
        assert_eq!("Vedda".parse::<WordLanguage>().unwrap(), WordLanguage::Vedda);
        assert_eq!("en".parse::<WordLanguage>().unwrap(), WordLanguage::English);
        assert_eq!(" sinhala ".parse::<WordLanguage>().unwrap(), WordLanguage::Sinhala);
        assert!("tamil".parse::<WordLanguage>().is_err());
    }

    #[test]
    fn word_reads_the_requested_column() {
        let mut entry = DictionaryEntry::new("kiri".to_string(), "milk".to_string());
        assert_eq!(entry.word(WordLanguage::English), Some("milk"));
        assert_eq!(entry.word(WordLanguage::Sinhala), None);
        entry.sinhala_word = Some("කිරි".to_string());
        assert_eq!(entry.word(WordLanguage::Sinhala), Some("කිරි"));
    }
}
