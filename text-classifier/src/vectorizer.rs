use crate::error::ClassifierError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// `(feature index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Terms seen in fewer documents are dropped.
    pub min_df: usize,
    /// Keep only the most frequent terms (by document frequency).
    pub max_features: Option<usize>,
    /// Use `1 + ln(tf)` instead of raw counts.
    pub sublinear_tf: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            min_df: 1,
            max_features: None,
            sublinear_tf: false,
        }
    }
}

/// Term-frequency / inverse-document-frequency weighting with smoothed idf
/// (`ln((1 + n) / (1 + df)) + 1`) and L2-normalised output rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    pub config: VectorizerConfig,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    pub fn fit(config: VectorizerConfig, documents: &[Vec<String>]) -> Result<Self> {
        if documents.is_empty() {
            return Err(ClassifierError::EmptyDataset);
        }
        if config.min_df == 0 {
            return Err(ClassifierError::InvalidParameter(
                "min_df must be at least 1".to_string(),
            ));
        }

        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for document in documents {
            let unique: HashSet<&str> = document.iter().map(String::as_str).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<(&str, usize)> = document_frequency
            .into_iter()
            .filter(|(_, df)| *df >= config.min_df)
            .collect();
        if let Some(max) = config.max_features {
            terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            terms.truncate(max);
        }
        if terms.is_empty() {
            return Err(ClassifierError::EmptyVocabulary {
                min_df: config.min_df,
            });
        }
        terms.sort_by(|a, b| a.0.cmp(b.0));

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(terms.len());
        for (index, (term, df)) in terms.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), index);
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        Ok(Self {
            config,
            vocabulary,
            idf,
        })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Every vocabulary index must address an idf weight.
    pub(crate) fn check_consistent(&self) -> Result<()> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(ClassifierError::Inconsistent(format!(
                "{} idf weights for {} vocabulary terms",
                self.idf.len(),
                self.vocabulary.len()
            )));
        }
        let out_of_range = self
            .vocabulary
            .iter()
            .find(|(_, index)| **index >= self.idf.len());
        if let Some((term, index)) = out_of_range {
            return Err(ClassifierError::Inconsistent(format!(
                "term '{}' has index {} outside the vocabulary",
                term, index
            )));
        }
        Ok(())
    }

    /// Unknown terms are ignored; a text with no known terms maps to an
    /// empty vector.
    pub fn transform(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseVector = counts
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.config.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (index, tf * self.idf[index])
            })
            .collect();

        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in row.iter_mut() {
                *weight /= norm;
            }
        }
        row
    }
}
