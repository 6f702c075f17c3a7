use crate::error::ClassifierError;
use crate::logistic::{LogisticRegression, SgdParams};
use crate::naive_bayes::MultinomialNb;
use crate::tokenizer::Tokenizer;
use crate::vectorizer::{SparseVector, TfIdfVectorizer, VectorizerConfig};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelConfig {
    NaiveBayes { alpha: f64 },
    Logistic(SgdParams),
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig::NaiveBayes { alpha: 1.0 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub tokenizer: Tokenizer,
    pub vectorizer: VectorizerConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Model {
    NaiveBayes(MultinomialNb),
    Logistic(LogisticRegression),
}

impl Model {
    fn predict_proba(&self, row: &SparseVector) -> Vec<f64> {
        match self {
            Model::NaiveBayes(model) => model.predict_proba(row),
            Model::Logistic(model) => model.predict_proba(row),
        }
    }

    fn check_shape(&self, n_classes: usize, n_features: usize) -> Result<()> {
        match self {
            Model::NaiveBayes(model) => model.check_shape(n_classes, n_features),
            Model::Logistic(model) => model.check_shape(n_classes, n_features),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f64,
    pub scores: BTreeMap<String, f64>,
}

/// Tokenizer, fitted vectorizer and classifier, persisted together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    tokenizer: Tokenizer,
    vectorizer: TfIdfVectorizer,
    model: Model,
    labels: Vec<String>,
}

impl Pipeline {
    pub fn fit(config: PipelineConfig, texts: &[String], labels: &[String]) -> Result<Self> {
        if texts.len() != labels.len() {
            return Err(ClassifierError::LengthMismatch {
                texts: texts.len(),
                labels: labels.len(),
            });
        }
        if texts.is_empty() {
            return Err(ClassifierError::EmptyDataset);
        }

        let classes: Vec<String> = labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if classes.len() < 2 {
            return Err(ClassifierError::TooFewClasses(classes.len()));
        }

        let documents: Vec<Vec<String>> = texts
            .iter()
            .map(|text| config.tokenizer.tokenize(text))
            .collect();
        let vectorizer = TfIdfVectorizer::fit(config.vectorizer, &documents)?;
        let rows: Vec<SparseVector> = documents.iter().map(|d| vectorizer.transform(d)).collect();
        let targets: Vec<usize> = labels
            .iter()
            .filter_map(|label| classes.binary_search(label).ok())
            .collect();

        let n_features = vectorizer.vocabulary_size();
        let model = match config.model {
            ModelConfig::NaiveBayes { alpha } => Model::NaiveBayes(MultinomialNb::fit(
                &rows,
                &targets,
                classes.len(),
                n_features,
                alpha,
            )?),
            ModelConfig::Logistic(params) => Model::Logistic(LogisticRegression::fit(
                &rows,
                &targets,
                classes.len(),
                n_features,
                params,
            )?),
        };

        tracing::debug!(
            classes = classes.len(),
            features = n_features,
            samples = texts.len(),
            "Pipeline fitted"
        );

        Ok(Self {
            tokenizer: config.tokenizer,
            vectorizer,
            model,
            labels: classes,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn predict(&self, text: &str) -> Prediction {
        let row = self.vectorizer.transform(&self.tokenizer.tokenize(text));
        let probabilities = self.model.predict_proba(&row);

        let mut best = 0;
        for (index, p) in probabilities.iter().enumerate() {
            if *p > probabilities[best] {
                best = index;
            }
        }

        Prediction {
            label: self.labels[best].clone(),
            confidence: probabilities[best],
            scores: self.labels.iter().cloned().zip(probabilities).collect(),
        }
    }

    pub fn predict_labels(&self, texts: &[String]) -> Vec<String> {
        texts.iter().map(|text| self.predict(text).label).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::validated(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Self::validated(serde_json::from_reader(reader)?)
    }

    /// Rejects deserialized pipelines whose parts disagree on shape, so
    /// `predict` never indexes out of bounds.
    fn validated(pipeline: Self) -> Result<Self> {
        if pipeline.labels.len() < 2 {
            return Err(ClassifierError::TooFewClasses(pipeline.labels.len()));
        }
        pipeline.vectorizer.check_consistent()?;
        pipeline
            .model
            .check_shape(pipeline.labels.len(), pipeline.vectorizer.vocabulary_size())?;
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> (Vec<String>, Vec<String>) {
        let samples = [
            ("i goed to the market", "verb_tense"),
            ("she runned home yesterday", "verb_tense"),
            ("he eated rice", "verb_tense"),
            ("they was going", "agreement"),
            ("she go to school", "agreement"),
            ("the dogs runs fast", "agreement"),
            ("hello teh world", "spelling"),
            ("recieve the parcel", "spelling"),
            ("definately tomorrow", "spelling"),
        ];
        samples
            .iter()
            .map(|(t, l)| (t.to_string(), l.to_string()))
            .unzip()
    }

    fn configs() -> Vec<PipelineConfig> {
        vec![
            PipelineConfig::default(),
            PipelineConfig {
                tokenizer: Tokenizer::new(true),
                vectorizer: VectorizerConfig {
                    sublinear_tf: true,
                    ..Default::default()
                },
                model: ModelConfig::Logistic(SgdParams {
                    epochs: 100,
                    ..Default::default()
                }),
            },
        ]
    }

    #[test]
    fn predicts_training_labels_on_separable_corpus() {
        let (texts, labels) = corpus();
        for config in configs() {
            let pipeline = Pipeline::fit(config.clone(), &texts, &labels).unwrap();
            assert_eq!(pipeline.predict_labels(&texts), labels, "{:?}", config.model);
        }
    }

    #[test]
    fn scores_cover_every_label() {
        let (texts, labels) = corpus();
        let pipeline = Pipeline::fit(PipelineConfig::default(), &texts, &labels).unwrap();
        let prediction = pipeline.predict("he eated the parcel");

        assert_eq!(pipeline.labels(), ["agreement", "spelling", "verb_tense"]);
        assert_eq!(prediction.scores.len(), 3);
        assert_eq!(prediction.scores[&prediction.label], prediction.confidence);
        assert!((prediction.scores.values().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn saved_pipeline_reproduces_predictions() {
        let (texts, labels) = corpus();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        for config in configs() {
            let pipeline = Pipeline::fit(config, &texts, &labels).unwrap();
            pipeline.save(&path).unwrap();
            let loaded = Pipeline::load(&path).unwrap();

            let unseen = "completely unseen words".to_string();
            for text in texts.iter().chain(std::iter::once(&unseen)) {
                let (before, after) = (pipeline.predict(text), loaded.predict(text));
                assert_eq!(before.label, after.label);
                for (label, score) in &before.scores {
                    assert!((score - after.scores[label]).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn single_class_is_rejected() {
        let texts = vec!["a".to_string(), "b".to_string()];
        let labels = vec!["x".to_string(), "x".to_string()];
        let err = Pipeline::fit(PipelineConfig::default(), &texts, &labels).unwrap_err();
        assert!(matches!(err, ClassifierError::TooFewClasses(1)));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = Pipeline::fit(PipelineConfig::default(), &["a".to_string()], &[])
            .unwrap_err();
        assert!(matches!(err, ClassifierError::LengthMismatch { .. }));
    }

    fn tampered(pipeline: &Pipeline, edit: impl FnOnce(&mut serde_json::Value)) -> String {
        let mut value: serde_json::Value =
            serde_json::from_str(&pipeline.to_json().unwrap()).unwrap();
        edit(&mut value);
        value.to_string()
    }

    #[test]
    fn relabelled_model_is_rejected_on_load() {
        let (texts, labels) = corpus();
        for config in configs() {
            let pipeline = Pipeline::fit(config, &texts, &labels).unwrap();
            let json = tampered(&pipeline, |value| {
                value["labels"] = serde_json::json!(["a", "s"]);
            });

            assert!(matches!(
                Pipeline::from_json(&json),
                Err(ClassifierError::Inconsistent(_))
            ));
        }
    }

    #[test]
    fn truncated_idf_is_rejected_on_load() {
        let (texts, labels) = corpus();
        let pipeline = Pipeline::fit(PipelineConfig::default(), &texts, &labels).unwrap();
        let json = tampered(&pipeline, |value| {
            value["vectorizer"]["idf"].as_array_mut().unwrap().truncate(1);
        });

        assert!(matches!(
            Pipeline::from_json(&json),
            Err(ClassifierError::Inconsistent(_))
        ));
    }

    #[test]
    fn out_of_range_term_index_is_rejected_on_load() {
        let (texts, labels) = corpus();
        let pipeline = Pipeline::fit(PipelineConfig::default(), &texts, &labels).unwrap();
        let json = tampered(&pipeline, |value| {
            value["vectorizer"]["vocabulary"]["market"] = serde_json::json!(10_000);
        });

        assert!(matches!(
            Pipeline::from_json(&json),
            Err(ClassifierError::Inconsistent(_))
        ));
    }

    #[test]
    fn short_weight_row_is_rejected_on_load() {
        let (texts, labels) = corpus();
        let pipeline = Pipeline::fit(PipelineConfig::default(), &texts, &labels).unwrap();
        let json = tampered(&pipeline, |value| {
            value["model"]["feature_log_prob"][0]
                .as_array_mut()
                .unwrap()
                .pop();
        });

        assert!(matches!(
            Pipeline::from_json(&json),
            Err(ClassifierError::Inconsistent(_))
        ));
    }

    #[test]
    fn garbage_json_is_an_error() {
        assert!(matches!(
            Pipeline::from_json("{\"labels\": []}"),
            Err(ClassifierError::Json(_))
        ));
    }
}
