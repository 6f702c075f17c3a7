use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Column '{0}' not found in dataset header")]
    MissingColumn(String),

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("At least two classes are required, found {0}")]
    TooFewClasses(usize),

    #[error("Split produced an empty {0} set")]
    EmptySplit(&'static str),

    #[error("No vocabulary left after filtering (min_df={min_df})")]
    EmptyVocabulary { min_df: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Texts and labels differ in length ({texts} vs {labels})")]
    LengthMismatch { texts: usize, labels: usize },

    #[error("Saved pipeline is inconsistent: {0}")]
    Inconsistent(String),
}
