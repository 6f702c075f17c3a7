#![allow(dead_code)]

use hound::{SampleFormat, WavSpec, WavWriter};
use reqwest::multipart::{Form, Part};
use service_core::config::{Config as CoreConfig, MongoConfig};
use speech_service::config::SpeechConfig;
use speech_service::services::{InMemoryRecordings, LocalStorage};
use speech_service::startup;
use std::f32::consts::PI;
use std::io::Cursor;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_MAX_AUDIO_BYTES: usize = 32 * 1024;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub storage_dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let storage_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = SpeechConfig {
            common: CoreConfig {
                port: 0,
                debug: false,
                log_level: None,
                otlp_endpoint: None,
            },
            mongodb: MongoConfig::new("mongodb://localhost:27017", "speech_test")
                .expect("valid test MongoDB config"),
            storage_path: storage_dir.path().to_path_buf(),
            max_audio_bytes: TEST_MAX_AUDIO_BYTES,
        };

        let storage = LocalStorage::new(&config.storage_path)
            .await
            .expect("Failed to prepare storage");
        let app = startup::build_with(
            config,
            Arc::new(InMemoryRecordings::new()),
            Arc::new(storage),
            None,
        )
        .await
        .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(format!("{}/health", address)).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            client,
            storage_dir,
        }
    }

    pub fn recordings_url(&self) -> String {
        format!("{}/api/speech/recordings", self.address)
    }

    pub async fn upload(&self, form: Form) -> reqwest::Response {
        self.client
            .post(self.recordings_url())
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.storage_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Mono 16-bit sine at 440 Hz.
pub fn sine_wav(sample_rate: u32, duration_ms: u32, amplitude: f32) -> Vec<u8> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut buffer, spec).expect("wav writer");
        let frames = sample_rate * duration_ms / 1000;
        for i in 0..frames {
            let t = i as f32 / sample_rate as f32;
            let value = ((2.0 * PI * 440.0 * t).sin() * amplitude * i16::MAX as f32) as i16;
            writer.write_sample(value).expect("write sample");
        }
        writer.finalize().expect("finalize wav");
    }
    buffer.into_inner()
}

pub fn audio_form(data: Vec<u8>, file_name: &str, mime: &str) -> Form {
    let part = Part::bytes(data)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .expect("valid mime");
    Form::new().part("file", part)
}
