use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassReport {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Held-out evaluation: accuracy, per-class scores and a confusion matrix
/// whose rows are expected labels and columns predicted labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub accuracy: f64,
    pub classes: Vec<ClassReport>,
    pub labels: Vec<String>,
    pub confusion: Vec<Vec<usize>>,
}

impl Report {
    /// Predictions outside `labels` count as misses for the expected class.
    pub fn evaluate(labels: &[String], expected: &[String], predicted: &[String]) -> Self {
        let position = |label: &String| labels.iter().position(|l| l == label);
        let mut confusion = vec![vec![0usize; labels.len()]; labels.len()];
        let mut correct = 0usize;

        for (truth, guess) in expected.iter().zip(predicted) {
            if truth == guess {
                correct += 1;
            }
            if let (Some(row), Some(column)) = (position(truth), position(guess)) {
                confusion[row][column] += 1;
            }
        }

        let classes = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let true_positive = confusion[i][i] as f64;
                let predicted_total: usize = confusion.iter().map(|row| row[i]).sum();
                let support = expected.iter().filter(|l| *l == label).count();
                let precision = ratio(true_positive, predicted_total as f64);
                let recall = ratio(true_positive, support as f64);
                ClassReport {
                    label: label.clone(),
                    precision,
                    recall,
                    f1: ratio(2.0 * precision * recall, precision + recall),
                    support,
                }
            })
            .collect();

        Report {
            accuracy: ratio(correct as f64, expected.len() as f64),
            classes,
            labels: labels.to_vec(),
            confusion,
        }
    }

    pub fn macro_f1(&self) -> f64 {
        ratio(
            self.classes.iter().map(|c| c.f1).sum(),
            self.classes.len() as f64,
        )
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(9);

        writeln!(
            f,
            "{:<width$} {:>9} {:>9} {:>9} {:>9}",
            "label", "precision", "recall", "f1", "support"
        )?;
        for class in &self.classes {
            writeln!(
                f,
                "{:<width$} {:>9.3} {:>9.3} {:>9.3} {:>9}",
                class.label, class.precision, class.recall, class.f1, class.support
            )?;
        }
        writeln!(f)?;
        writeln!(f, "accuracy  {:.3}", self.accuracy)?;
        writeln!(f, "macro f1  {:.3}", self.macro_f1())?;
        writeln!(f)?;
        writeln!(f, "confusion (rows = expected, columns = predicted)")?;
        for (label, row) in self.labels.iter().zip(&self.confusion) {
            let cells: Vec<String> = row.iter().map(|c| format!("{:>5}", c)).collect();
            writeln!(f, "{:<width$} {}", label, cells.join(""))?;
        }
        Ok(())
    }
}
