use serde::Deserialize;
use service_core::config::{self as core_config, env_or, env_parse, MongoConfig};
use service_core::error::AppError;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5004;
pub const DEFAULT_STORAGE_PATH: &str = "storage/audio";
pub const DEFAULT_MAX_AUDIO_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub storage_path: PathBuf,
    pub max_audio_bytes: usize,
}

impl SpeechConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load(DEFAULT_PORT)?;

        let max_audio_bytes = env_parse("MAX_AUDIO_BYTES", DEFAULT_MAX_AUDIO_BYTES)?;
        if max_audio_bytes == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "MAX_AUDIO_BYTES must be greater than zero"
            )));
        }

        Ok(SpeechConfig {
            common,
            mongodb: MongoConfig::from_env()?,
            storage_path: PathBuf::from(env_or("AUDIO_STORAGE_PATH", DEFAULT_STORAGE_PATH)),
            max_audio_bytes,
        })
    }
}
