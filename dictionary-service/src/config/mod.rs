use serde::Deserialize;
use service_core::config::{self as core_config, MongoConfig};
use service_core::error::AppError;

pub const DEFAULT_PORT: u16 = 5001;

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
}

impl DictionaryConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load(DEFAULT_PORT)?;

        Ok(DictionaryConfig {
            common,
            mongodb: MongoConfig::from_env()?,
        })
    }
}
