//! TF-IDF text classification.
//!
//! Texts are tokenised, weighted with a [`TfIdfVectorizer`] and scored by a
//! multinomial naive Bayes or logistic regression model. A fitted
//! [`Pipeline`] is persisted as a single JSON document and loaded back by
//! the learning service.

pub mod dataset;
pub mod error;
pub mod logistic;
pub mod metrics;
pub mod naive_bayes;
pub mod pipeline;
pub mod tokenizer;
pub mod vectorizer;

pub use dataset::Dataset;
pub use error::ClassifierError;
pub use metrics::Report;
pub use pipeline::{ModelConfig, Pipeline, PipelineConfig, Prediction};
pub use tokenizer::Tokenizer;
pub use vectorizer::{SparseVector, TfIdfVectorizer, VectorizerConfig};

pub type Result<T> = std::result::Result<T, ClassifierError>;
