use crate::error::ClassifierError;
use crate::logistic::{check_matrix, softmax};
use crate::vectorizer::SparseVector;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Multinomial naive Bayes over TF-IDF weights with Laplace smoothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    pub alpha: f64,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    pub fn fit(
        rows: &[SparseVector],
        targets: &[usize],
        n_classes: usize,
        n_features: usize,
        alpha: f64,
    ) -> Result<Self> {
        if !(alpha > 0.0) {
            return Err(ClassifierError::InvalidParameter(format!(
                "alpha must be positive, got {}",
                alpha
            )));
        }

        let mut class_count = vec![0usize; n_classes];
        let mut feature_count = vec![vec![0.0; n_features]; n_classes];
        for (row, &class) in rows.iter().zip(targets) {
            class_count[class] += 1;
            for &(index, weight) in row {
                feature_count[class][index] += weight;
            }
        }

        let total = rows.len() as f64;
        let class_log_prior = class_count
            .iter()
            .map(|&count| (count.max(1) as f64 / total).ln())
            .collect();

        let feature_log_prob = feature_count
            .into_iter()
            .map(|counts| {
                let denominator = (counts.iter().sum::<f64>() + alpha * n_features as f64).ln();
                counts
                    .into_iter()
                    .map(|count| (count + alpha).ln() - denominator)
                    .collect()
            })
            .collect();

        Ok(Self {
            alpha,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Checks the fitted parameters against the class and feature counts.
    pub(crate) fn check_shape(&self, n_classes: usize, n_features: usize) -> Result<()> {
        check_matrix(&self.feature_log_prob, n_classes, n_features)?;
        if self.class_log_prior.len() != n_classes {
            return Err(ClassifierError::Inconsistent(format!(
                "class prior has {} entries for {} classes",
                self.class_log_prior.len(),
                n_classes
            )));
        }
        Ok(())
    }

    pub fn predict_proba(&self, row: &SparseVector) -> Vec<f64> {
        let mut scores: Vec<f64> = self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_prob)| {
                prior
                    + row
                        .iter()
                        .map(|&(index, weight)| weight * log_prob[index])
                        .sum::<f64>()
            })
            .collect();
        softmax(&mut scores);
        scores
    }
}
