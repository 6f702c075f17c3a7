use serde::Deserialize;
use service_core::config::{self as core_config, MongoConfig};
use service_core::error::AppError;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5006;

#[derive(Debug, Clone, Deserialize)]
pub struct LearningConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    /// Fitted pipeline written by `train-classifier`. When set it must load.
    pub classifier_model_path: Option<PathBuf>,
}

impl LearningConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load(DEFAULT_PORT)?;

        let classifier_model_path = core_config::env_opt("CLASSIFIER_MODEL_PATH").map(PathBuf::from);

        Ok(LearningConfig {
            common,
            mongodb: MongoConfig::from_env()?,
            classifier_model_path,
        })
    }
}
