#![allow(dead_code)]

use learning_service::config::LearningConfig;
use learning_service::services::{InMemoryMistakes, MistakeClassifier};
use learning_service::startup;
use serde_json::{json, Value};
use service_core::config::{Config as CoreConfig, MongoConfig};
use std::sync::Arc;
use text_classifier::{Pipeline, PipelineConfig};

pub const TRAINING: &[(&str, &str)] = &[
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

pub fn trained_pipeline() -> Pipeline {
    let (texts, labels): (Vec<String>, Vec<String>) = TRAINING
        .iter()
        .map(|(t, l)| (t.to_string(), l.to_string()))
        .unzip();
    Pipeline::fit(PipelineConfig::default(), &texts, &labels).expect("toy corpus trains")
}

pub fn test_config() -> LearningConfig {
    LearningConfig {
        common: CoreConfig {
            port: 0,
            debug: false,
            log_level: None,
            otlp_endpoint: None,
        },
        mongodb: MongoConfig::new("mongodb://localhost:27017", "learning_test")
            .expect("valid test MongoDB config"),
        classifier_model_path: None,
    }
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Without a classifier.
    pub async fn spawn() -> Self {
        Self::spawn_with(None).await
    }

    pub async fn spawn_with_classifier() -> Self {
        Self::spawn_with(Some(MistakeClassifier::new(trained_pipeline()))).await
    }

    async fn spawn_with(classifier: Option<MistakeClassifier>) -> Self {
        let app = startup::build_with(
            test_config(),
            Arc::new(InMemoryMistakes::new()),
            classifier,
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

        TestApp { address, client }
    }

    pub async fn classify(&self, text: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/api/learning/classify", self.address))
            .json(&json!({ "text": text }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn record(&self, learner_id: &str, expected: &str, submitted: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/api/learning/mistakes", self.address))
            .json(&json!({
                "learner_id": learner_id,
                "expected": expected,
                "submitted": submitted
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_json(&self, path: &str) -> Value {
        let response = self
            .client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 200);
        response.json().await.expect("Failed to parse JSON")
    }
}
