use crate::error::ClassifierError;
use crate::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Labelled texts, kept as two parallel columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub texts: Vec<String>,
    pub labels: Vec<String>,
}

impl Dataset {
    pub fn from_csv_path(path: impl AsRef<Path>, text_column: &str, label_column: &str) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file, text_column, label_column)
    }

    /// Rows with a blank text or label are skipped.
    pub fn from_csv_reader<R: Read>(reader: R, text_column: &str, label_column: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ClassifierError::MissingColumn(name.to_string()))
        };
        let text_index = column(text_column)?;
        let label_index = column(label_column)?;

        let mut dataset = Dataset::default();
        let mut skipped = 0usize;
        for record in reader.records() {
            let record = record?;
            match (record.get(text_index), record.get(label_index)) {
                (Some(text), Some(label)) if !text.is_empty() && !label.is_empty() => {
                    dataset.texts.push(text.to_string());
                    dataset.labels.push(label.to_string());
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "Skipped incomplete dataset rows");
        }
        if dataset.is_empty() {
            return Err(ClassifierError::EmptyDataset);
        }
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn class_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for label in &self.labels {
            *counts.entry(label.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Seeded shuffle, then the first `test_size` fraction becomes the test
    /// set. Either side ending up empty is an error.
    pub fn split(&self, test_size: f64, seed: u64) -> Result<(Dataset, Dataset)> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(ClassifierError::InvalidParameter(format!(
                "test_size must be between 0 and 1, got {}",
                test_size
            )));
        }

        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(seed));

        let test_len = (self.len() as f64 * test_size).round() as usize;
        let (test_idx, train_idx) = order.split_at(test_len.min(self.len()));
        if test_idx.is_empty() {
            return Err(ClassifierError::EmptySplit("test"));
        }
        if train_idx.is_empty() {
            return Err(ClassifierError::EmptySplit("training"));
        }

        Ok((self.subset(train_idx), self.subset(test_idx)))
    }

    fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            texts: indices.iter().map(|&i| self.texts[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }
}
