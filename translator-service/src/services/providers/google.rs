//! Google Translate `translate_a/single` endpoint.
//!
//! The endpoint answers with nested arrays; the first element holds one
//! `[translated, original, ...]` segment per sentence.

use super::TranslationProvider;
use crate::models::Language;
use crate::services::UpstreamError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use service_core::observability::TracedClientExt;
use std::time::Duration;

const UPSTREAM: &str = "translation API";

pub struct GoogleTranslateProvider {
    client: Client,
    endpoint: reqwest::Url,
    timeout: Duration,
}

impl GoogleTranslateProvider {
    pub fn new(client: Client, endpoint: reqwest::Url, timeout: Duration) -> Self {
        Self {
            client,
            endpoint,
            timeout,
        }
    }
}

/// Joins the translated segments of a response body.
pub fn parse_segments(body: &Value) -> Result<String, UpstreamError> {
    let malformed = |reason: &str| UpstreamError::Malformed(UPSTREAM.to_string(), reason.to_string());

    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("missing segment list"))?;

    let mut translated = String::new();
    for segment in segments {
        // Trailing transliteration segments carry a null first element.
        match segment.get(0) {
            Some(Value::String(part)) => translated.push_str(part),
            Some(Value::Null) => {}
            _ => return Err(malformed("segment without text")),
        }
    }

    if translated.is_empty() {
        return Err(malformed("empty translation"));
    }
    Ok(translated)
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, UpstreamError> {
        tracing::debug!(
            source = %source,
            target = %target,
            text_len = text.len(),
            "Sending request to translation API"
        );

        let response = self
            .client
            .traced_get(self.endpoint.as_str())
            .query(&[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(UPSTREAM, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Translation API returned an error status");
            return Err(UpstreamError::Status(UPSTREAM.to_string(), status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::from_reqwest(UPSTREAM, e))?;

        parse_segments(&body)
    }
}
