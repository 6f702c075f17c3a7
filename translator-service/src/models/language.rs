use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Languages the translator accepts, identified by their normalised code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Vedda,
    English,
    Sinhala,
    Tamil,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Vedda,
        Language::English,
        Language::Sinhala,
        Language::Tamil,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Vedda => "vedda",
            Language::English => "en",
            Language::Sinhala => "si",
            Language::Tamil => "ta",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Vedda => "Vedda",
            Language::English => "English",
            Language::Sinhala => "Sinhala",
            Language::Tamil => "Tamil",
        }
    }

    /// Vedda has no external API support and is served from the dictionary.
    pub fn dictionary_only(&self) -> bool {
        matches!(self, Language::Vedda)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vedda" | "ved" => Ok(Language::Vedda),
            "english" | "en" => Ok(Language::English),
            "sinhala" | "si" => Ok(Language::Sinhala),
            "tamil" | "ta" => Ok(Language::Tamil),
            other => Err(format!("Unsupported language: '{}'", other)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
}

impl From<Language> for LanguageInfo {
    fn from(language: Language) -> Self {
        Self {
            code: language.code(),
            name: language.name(),
        }
    }
}
