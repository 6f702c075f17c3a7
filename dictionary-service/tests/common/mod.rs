#![allow(dead_code)]

use dictionary_service::config::DictionaryConfig;
use dictionary_service::services::InMemoryDictionary;
use dictionary_service::startup;
use serde_json::Value;
use service_core::config::{Config as CoreConfig, MongoConfig};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

pub fn test_config() -> DictionaryConfig {
    DictionaryConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            debug: false,
            log_level: None,
            otlp_endpoint: None,
        },
        mongodb: MongoConfig::new("mongodb://localhost:27017", "dictionary_test")
            .expect("valid test MongoDB config"),
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let app = startup::build_with_repository(
            test_config(),
            Arc::new(InMemoryDictionary::new()),
            None,
        )
        .await
        .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn create_entry(&self, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/dictionary", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn lookup(&self, query: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .get(format!("{}/api/dictionary", self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn search(&self, query: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .get(format!("{}/api/dictionary/search", self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
