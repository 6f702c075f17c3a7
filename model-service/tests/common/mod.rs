#![allow(dead_code)]

use model_service::config::ModelConfig;
use model_service::services::InMemoryCatalog;
use model_service::startup;
use serde_json::{json, Value};
use service_core::config::{Config as CoreConfig, MongoConfig};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = ModelConfig {
            common: CoreConfig {
                port: 0,
                debug: false,
                log_level: None,
                otlp_endpoint: None,
            },
            mongodb: MongoConfig::new("mongodb://localhost:27017", "models_test")
                .expect("valid test MongoDB config"),
        };

        let app = startup::build_with_repository(config, Arc::new(InMemoryCatalog::new()), None)
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

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Registers a GLB model and returns its id.
    pub async fn create_model(&self, name: &str, category: &str) -> String {
        let response = self
            .post(
                "/api/models",
                &json!({
                    "name": name,
                    "category": category,
                    "file_url": format!("https://cdn.example.org/models/{}.glb", name),
                    "format": "glb"
                }),
            )
            .await;
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["id"].as_str().expect("id in response").to_string()
    }
}
