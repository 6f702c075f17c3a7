#![allow(dead_code)]

use history_service::config::HistoryConfig;
use history_service::services::InMemoryHistory;
use history_service::startup;
use serde_json::{json, Value};
use service_core::config::{Config as CoreConfig, MongoConfig};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = HistoryConfig {
            common: CoreConfig {
                port: 0,
                debug: false,
                log_level: None,
                otlp_endpoint: None,
            },
            mongodb: MongoConfig::new("mongodb://localhost:27017", "history_test")
                .expect("valid test MongoDB config"),
        };

        let app = startup::build_with_repository(config, Arc::new(InMemoryHistory::new()), None)
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

    pub async fn record(&self, source_text: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/api/history", self.address))
            .json(&json!({
                "source_text": source_text,
                "translated_text": format!("{} (translated)", source_text),
                "source_language": "vedda",
                "target_language": "en",
                "method": "dictionary"
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn list(&self, query: &[(&str, &str)]) -> Value {
        self.client
            .get(format!("{}/api/history", self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse JSON")
    }
}
