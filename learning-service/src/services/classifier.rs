use service_core::error::AppError;
use std::path::Path;
use std::sync::Arc;
use text_classifier::{Pipeline, Prediction};

/// Shared handle to a fitted pipeline.
#[derive(Clone)]
pub struct MistakeClassifier {
    pipeline: Arc<Pipeline>,
}

impl MistakeClassifier {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    pub fn labels(&self) -> &[String] {
        self.pipeline.labels()
    }

    pub fn classify(&self, text: &str) -> Prediction {
        self.pipeline.predict(text)
    }
}

/// Loads the pipeline at `path`. Any failure is a configuration error so
/// that startup aborts.
pub fn load_classifier(path: &Path) -> Result<MistakeClassifier, AppError> {
    let pipeline = Pipeline::load(path).map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "Failed to load classifier from {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::info!(
        path = %path.display(),
        labels = ?pipeline.labels(),
        "Classifier loaded"
    );
    Ok(MistakeClassifier::new(pipeline))
}
