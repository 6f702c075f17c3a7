//! Signal statistics for PCM WAV data.
//!
//! Samples are normalised to `[-1.0, 1.0]` before any statistic is taken, so
//! results are comparable across bit depths.

use hound::{SampleFormat, WavReader};
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read};
use std::path::Path;
use thiserror::Error;

/// Amplitude below which a sample counts as silence (about -40 dBFS).
pub const SILENCE_THRESHOLD: f64 = 0.01;

/// Amplitude at or above which a sample counts as clipped.
pub const CLIP_THRESHOLD: f64 = 0.999;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid WAV data: {0}")]
    Wav(#[from] hound::Error),

    #[error("unsupported WAV format: {0}")]
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioStats {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub duration_secs: f64,
    pub rms: f64,
    pub peak: f64,
    /// Share of samples below [`SILENCE_THRESHOLD`].
    pub silence_ratio: f64,
    /// Share of samples at or above [`CLIP_THRESHOLD`].
    pub clipped_ratio: f64,
}

#[derive(Default)]
struct Accumulator {
    count: u64,
    sum_squares: f64,
    peak: f64,
    silent: u64,
    clipped: u64,
}

impl Accumulator {
    fn push(&mut self, sample: f64) {
        let magnitude = sample.abs();
        self.count += 1;
        self.sum_squares += sample * sample;
        self.peak = self.peak.max(magnitude);
        if magnitude < SILENCE_THRESHOLD {
            self.silent += 1;
        }
        if magnitude >= CLIP_THRESHOLD {
            self.clipped += 1;
        }
    }

    fn ratio(&self, n: u64) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            n as f64 / self.count as f64
        }
    }
}

pub fn analyze_wav<R: Read>(mut reader: WavReader<R>) -> Result<AudioStats, AnalysisError> {
    let spec = reader.spec();
    if spec.sample_rate == 0 || spec.channels == 0 {
        return Err(AnalysisError::Unsupported(format!(
            "{} Hz with {} channels",
            spec.sample_rate, spec.channels
        )));
    }

    let mut acc = Accumulator::default();
    match spec.sample_format {
        SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(AnalysisError::Unsupported(format!(
                    "{}-bit integer samples",
                    spec.bits_per_sample
                )));
            }
            let scale = (1u64 << (spec.bits_per_sample - 1)) as f64;
            for sample in reader.samples::<i32>() {
                acc.push(sample? as f64 / scale);
            }
        }
        SampleFormat::Float => {
            for sample in reader.samples::<f32>() {
                acc.push(f64::from(sample?));
            }
        }
    }

    let frames = acc.count / u64::from(spec.channels);
    let rms = if acc.count == 0 {
        0.0
    } else {
        (acc.sum_squares / acc.count as f64).sqrt()
    };

    Ok(AudioStats {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        duration_secs: frames as f64 / f64::from(spec.sample_rate),
        rms,
        peak: acc.peak,
        silence_ratio: acc.ratio(acc.silent),
        clipped_ratio: acc.ratio(acc.clipped),
    })
}

pub fn analyze_bytes(data: &[u8]) -> Result<AudioStats, AnalysisError> {
    analyze_wav(WavReader::new(Cursor::new(data))?)
}

pub fn analyze_file(path: &Path) -> Result<AudioStats, AnalysisError> {
    analyze_wav(WavReader::open(path)?)
}
