use crate::error::ClassifierError;
use crate::vectorizer::SparseVector;
use crate::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SgdParams {
    pub learning_rate: f64,
    pub l2: f64,
    pub epochs: usize,
    pub seed: u64,
}

impl Default for SgdParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            l2: 1e-4,
            epochs: 30,
            seed: 42,
        }
    }
}

/// Multinomial (softmax) logistic regression trained with plain SGD.
///
/// The L2 penalty is applied to the weights of the features present in each
/// sample, so sparse rows stay cheap to train on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub params: SgdParams,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl LogisticRegression {
    pub fn fit(
        rows: &[SparseVector],
        targets: &[usize],
        n_classes: usize,
        n_features: usize,
        params: SgdParams,
    ) -> Result<Self> {
        if !(params.learning_rate > 0.0) || params.l2 < 0.0 || params.epochs == 0 {
            return Err(ClassifierError::InvalidParameter(format!(
                "learning_rate must be positive, l2 non-negative and epochs at least 1 (got {:?})",
                params
            )));
        }

        let mut model = Self {
            weights: vec![vec![0.0; n_features]; n_classes],
            bias: vec![0.0; n_classes],
            params,
        };

        let mut rng = StdRng::seed_from_u64(model.params.seed);
        let mut order: Vec<usize> = (0..rows.len()).collect();

        for epoch in 0..model.params.epochs {
            order.shuffle(&mut rng);
            let rate = model.params.learning_rate / (1.0 + 0.01 * epoch as f64);

            for &sample in &order {
                let row = &rows[sample];
                let probabilities = model.predict_proba(row);
                for (class, probability) in probabilities.into_iter().enumerate() {
                    let target = if class == targets[sample] { 1.0 } else { 0.0 };
                    let gradient = probability - target;
                    let weights = &mut model.weights[class];
                    for &(index, value) in row {
                        let w = weights[index];
                        weights[index] = w - rate * (gradient * value + model.params.l2 * w);
                    }
                    model.bias[class] -= rate * gradient;
                }
            }
        }

        Ok(model)
    }

    /// Checks the fitted parameters against the class and feature counts.
    pub(crate) fn check_shape(&self, n_classes: usize, n_features: usize) -> Result<()> {
        check_matrix(&self.weights, n_classes, n_features)?;
        if self.bias.len() != n_classes {
            return Err(ClassifierError::Inconsistent(format!(
                "bias has {} entries for {} classes",
                self.bias.len(),
                n_classes
            )));
        }
        Ok(())
    }

    pub fn predict_proba(&self, row: &SparseVector) -> Vec<f64> {
        let mut scores: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(weights, bias)| {
                bias + row
                    .iter()
                    .map(|&(index, value)| weights[index] * value)
                    .sum::<f64>()
            })
            .collect();
        softmax(&mut scores);
        scores
    }
}

/// One row per class, one column per feature.
pub(crate) fn check_matrix(rows: &[Vec<f64>], n_classes: usize, n_features: usize) -> Result<()> {
    if rows.len() != n_classes {
        return Err(ClassifierError::Inconsistent(format!(
            "model has {} classes, expected {}",
            rows.len(),
            n_classes
        )));
    }
    if let Some(row) = rows.iter().find(|row| row.len() != n_features) {
        return Err(ClassifierError::Inconsistent(format!(
            "weight row has {} features, vocabulary has {}",
            row.len(),
            n_features
        )));
    }
    Ok(())
}

/// In-place softmax, shifted by the maximum for numerical stability.
pub(crate) fn softmax(scores: &mut [f64]) {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for score in scores.iter_mut() {
        *score = (*score - max).exp();
        sum += *score;
    }
    if sum > 0.0 {
        for score in scores.iter_mut() {
            *score /= sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> (Vec<SparseVector>, Vec<usize>) {
        let rows = vec![
            vec![(0, 1.0)],
            vec![(0, 0.7), (1, 0.7)],
            vec![(2, 1.0)],
            vec![(2, 0.7), (3, 0.7)],
            vec![(4, 1.0)],
        ];
        (rows, vec![0, 0, 1, 1, 2])
    }

    #[test]
    fn learns_separable_classes() {
        let (rows, targets) = toy();
        let model = LogisticRegression::fit(&rows, &targets, 3, 5, SgdParams::default()).unwrap();
        for (row, &target) in rows.iter().zip(&targets) {
            let p = model.predict_proba(row);
            let best = (0..3).max_by(|&a, &b| p[a].total_cmp(&p[b])).unwrap();
            assert_eq!(best, target);
        }
    }

    #[test]
    fn same_seed_same_weights() {
        let (rows, targets) = toy();
        let a = LogisticRegression::fit(&rows, &targets, 3, 5, SgdParams::default()).unwrap();
        let b = LogisticRegression::fit(&rows, &targets, 3, 5, SgdParams::default()).unwrap();
        assert_eq!(a.weights, b.weights);
    }

    #[test]
    fn softmax_sums_to_one() {
        let mut scores = vec![1000.0, 1001.0, 999.0];
        softmax(&mut scores);
        assert!((scores.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(scores[1] > scores[0]);
    }

    #[test]
    fn rejects_zero_epochs() {
        let (rows, targets) = toy();
        let params = SgdParams {
            epochs: 0,
            ..Default::default()
        };
        assert!(LogisticRegression::fit(&rows, &targets, 3, 5, params).is_err());
    }
}
