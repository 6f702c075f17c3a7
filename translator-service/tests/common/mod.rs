#![allow(dead_code)]

use reqwest::Url;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use std::time::Duration;
use translator_service::config::{ProviderKind, TranslatorConfig};
use translator_service::services::{
    GoogleTranslateProvider, HttpDictionaryClient, HttpHistoryClient, MockTranslationProvider,
    TranslationProvider, Translator,
};
use translator_service::startup;
use wiremock::MockServer;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

/// Upstream doubles for one test.
pub struct Upstreams {
    pub dictionary: MockServer,
    pub history: MockServer,
    pub translation_api: MockServer,
}

impl Upstreams {
    pub async fn start() -> Self {
        Self {
            dictionary: MockServer::start().await,
            history: MockServer::start().await,
            translation_api: MockServer::start().await,
        }
    }

    pub fn api_endpoint(&self) -> Url {
        Url::parse(&format!("{}/translate_a/single", self.translation_api.uri()))
            .expect("valid mock URL")
    }
}

fn config(upstreams_api: Url, dictionary: Url, history: Url, timeout: Duration) -> TranslatorConfig {
    TranslatorConfig {
        common: CoreConfig {
            port: 0,
            debug: false,
            log_level: None,
            otlp_endpoint: None,
        },
        dictionary_url: dictionary,
        history_url: history,
        translation_api_url: upstreams_api,
        provider: ProviderKind::Google,
        timeout,
    }
}

impl TestApp {
    /// Boots the service against the given upstream doubles using the
    /// Google provider pointed at `translation_api`.
    pub async fn spawn(upstreams: &Upstreams) -> Self {
        Self::spawn_with_timeout(upstreams, Duration::from_secs(5), false).await
    }

    /// Same as [`TestApp::spawn`] but translating through the mock provider.
    pub async fn spawn_with_mock_provider(upstreams: &Upstreams) -> Self {
        Self::spawn_with_timeout(upstreams, Duration::from_secs(5), true).await
    }

    pub async fn spawn_with_timeout(upstreams: &Upstreams, timeout: Duration, mock: bool) -> Self {
        let dictionary_url = Url::parse(&upstreams.dictionary.uri()).expect("valid mock URL");
        Self::spawn_against(upstreams, dictionary_url, timeout, mock).await
    }

    pub async fn spawn_against(
        upstreams: &Upstreams,
        dictionary_url: Url,
        timeout: Duration,
        mock: bool,
    ) -> Self {
        let history_url = Url::parse(&upstreams.history.uri()).expect("valid mock URL");
        let http = reqwest::Client::new();

        let provider: Arc<dyn TranslationProvider> = if mock {
            Arc::new(MockTranslationProvider::new())
        } else {
            Arc::new(GoogleTranslateProvider::new(
                http.clone(),
                upstreams.api_endpoint(),
                timeout,
            ))
        };
        let translator = Translator::new(
            provider,
            Arc::new(HttpDictionaryClient::new(http.clone(), dictionary_url.clone())),
        );
        let history = Arc::new(HttpHistoryClient::new(http, history_url.clone()));

        let app = startup::build_with(
            config(upstreams.api_endpoint(), dictionary_url, history_url, timeout),
            translator,
            history,
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
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp { address, client }
    }

    pub async fn translate(&self, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/translate", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
