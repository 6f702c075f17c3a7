use service_core::config::{self as core_config, env_or, env_parse, env_url};
use service_core::error::AppError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5003;
pub const DEFAULT_DICTIONARY_URL: &str = "http://localhost:5001";
pub const DEFAULT_HISTORY_URL: &str = "http://localhost:5002";
pub const DEFAULT_TRANSLATION_API_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which backend serves external translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    Mock,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(ProviderKind::Google),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(format!("unknown provider '{}', expected google or mock", other)),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Google => write!(f, "google"),
            ProviderKind::Mock => write!(f, "mock"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub common: core_config::Config,
    pub dictionary_url: reqwest::Url,
    pub history_url: reqwest::Url,
    pub translation_api_url: reqwest::Url,
    pub provider: ProviderKind,
    pub timeout: Duration,
}

impl TranslatorConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load(DEFAULT_PORT)?;

        let provider = env_or("TRANSLATION_PROVIDER", "google")
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!("TRANSLATION_PROVIDER: {}", e)))?;

        let timeout_secs: u64 = env_parse("TRANSLATION_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "TRANSLATION_TIMEOUT_SECS must be greater than zero"
            )));
        }

        Ok(TranslatorConfig {
            common,
            dictionary_url: env_url("DICTIONARY_SERVICE_URL", DEFAULT_DICTIONARY_URL)?,
            history_url: env_url("HISTORY_SERVICE_URL", DEFAULT_HISTORY_URL)?,
            translation_api_url: env_url("TRANSLATION_API_URL", DEFAULT_TRANSLATION_API_URL)?,
            provider,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
