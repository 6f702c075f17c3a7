//! Batch analysis of a directory of WAV recordings.

use crate::analysis::{self, AudioStats};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Files whose silence ratio exceeds this are flagged.
    pub silence_ratio: f64,
    /// Files whose clipped ratio exceeds this are flagged.
    pub clipped_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            silence_ratio: 0.5,
            clipped_ratio: 0.001,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub stats: AudioStats,
    pub mostly_silent: bool,
    pub clipped: bool,
}

#[derive(Debug, Serialize)]
pub struct Failure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub count: usize,
    pub failed: usize,
    pub total_duration_secs: f64,
    pub mean_duration_secs: f64,
    pub sample_rates: BTreeMap<u32, usize>,
    pub mostly_silent: usize,
    pub clipped: usize,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub files: Vec<FileReport>,
    pub failures: Vec<Failure>,
    pub summary: Summary,
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

/// Analyses every `.wav` under `root` in path order. Unreadable files and
/// directory entries are recorded as failures, not errors.
pub fn scan(root: &Path, thresholds: Thresholds) -> Report {
    let mut files = Vec::new();
    let mut failures = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                failures.push(Failure {
                    path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
                    error: e.to_string(),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_wav(entry.path()) {
            continue;
        }

        match analysis::analyze_file(entry.path()) {
            Ok(stats) => files.push(FileReport {
                path: entry.path().to_path_buf(),
                mostly_silent: stats.silence_ratio > thresholds.silence_ratio,
                clipped: stats.clipped_ratio > thresholds.clipped_ratio,
                stats,
            }),
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), error = %e, "Skipping unreadable file");
                failures.push(Failure {
                    path: entry.path().to_path_buf(),
                    error: e.to_string(),
                });
            }
        }
    }

    let summary = summarize(&files, failures.len());
    Report {
        files,
        failures,
        summary,
    }
}

fn summarize(files: &[FileReport], failed: usize) -> Summary {
    let mut summary = Summary {
        count: files.len(),
        failed,
        ..Summary::default()
    };

    for file in files {
        summary.total_duration_secs += file.stats.duration_secs;
        *summary.sample_rates.entry(file.stats.sample_rate).or_insert(0) += 1;
        if file.mostly_silent {
            summary.mostly_silent += 1;
        }
        if file.clipped {
            summary.clipped += 1;
        }
    }
    if !files.is_empty() {
        summary.mean_duration_secs = summary.total_duration_secs / files.len() as f64;
    }
    summary
}
