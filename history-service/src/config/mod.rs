use serde::Deserialize;
use service_core::config::{self as core_config, MongoConfig};
use service_core::error::AppError;

pub const DEFAULT_PORT: u16 = 5002;

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
}

impl HistoryConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load(DEFAULT_PORT)?;

        Ok(HistoryConfig {
            common,
            mongodb: MongoConfig::from_env()?,
        })
    }
}
