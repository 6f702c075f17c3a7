//! Clients for the dictionary and history services.

use super::UpstreamError;
use crate::models::Language;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use service_core::observability::TracedClientExt;
use std::collections::HashMap;

/// The part of a dictionary entry the translator needs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DictionaryWord {
    pub vedda_word: String,
    pub english_word: String,
}

#[async_trait]
pub trait DictionaryClient: Send + Sync {
    /// `Ok(None)` when the dictionary has no entry for `word`.
    /// `request_id` is forwarded as `x-request-id`.
    async fn lookup(
        &self,
        word: &str,
        from: Language,
        request_id: Option<&str>,
    ) -> Result<Option<DictionaryWord>, UpstreamError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub source_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub method: String,
    pub metadata: HashMap<String, String>,
}

#[async_trait]
pub trait HistoryClient: Send + Sync {
    async fn record(
        &self,
        record: &HistoryRecord,
        request_id: Option<&str>,
    ) -> Result<(), UpstreamError>;
}

fn endpoint(base: &reqwest::Url, path: &str) -> String {
    format!("{}{}", base.as_str().trim_end_matches('/'), path)
}

fn dictionary_language(language: Language) -> &'static str {
    match language {
        Language::Vedda => "vedda",
        Language::Sinhala => "sinhala",
        _ => "english",
    }
}

pub struct HttpDictionaryClient {
    client: Client,
    base_url: reqwest::Url,
}

impl HttpDictionaryClient {
    const UPSTREAM: &'static str = "dictionary service";

    pub fn new(client: Client, base_url: reqwest::Url) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl DictionaryClient for HttpDictionaryClient {
    async fn lookup(
        &self,
        word: &str,
        from: Language,
        request_id: Option<&str>,
    ) -> Result<Option<DictionaryWord>, UpstreamError> {
        let response = self
            .client
            .traced_get(&endpoint(&self.base_url, "/api/dictionary"))
            .query(&[("word", word), ("from", dictionary_language(from))])
            .send_with_request_id(request_id)
            .await
            .map_err(|e| UpstreamError::from_reqwest(Self::UPSTREAM, e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let entry = response
                    .json::<DictionaryWord>()
                    .await
                    .map_err(|e| UpstreamError::from_reqwest(Self::UPSTREAM, e))?;
                Ok(Some(entry))
            }
            status => Err(UpstreamError::Status(
                Self::UPSTREAM.to_string(),
                status.as_u16(),
            )),
        }
    }
}

pub struct HttpHistoryClient {
    client: Client,
    base_url: reqwest::Url,
}

impl HttpHistoryClient {
    const UPSTREAM: &'static str = "history service";

    pub fn new(client: Client, base_url: reqwest::Url) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl HistoryClient for HttpHistoryClient {
    async fn record(
        &self,
        record: &HistoryRecord,
        request_id: Option<&str>,
    ) -> Result<(), UpstreamError> {
        let response = self
            .client
            .traced_post(&endpoint(&self.base_url, "/api/history"))
            .json(record)
            .send_with_request_id(request_id)
            .await
            .map_err(|e| UpstreamError::from_reqwest(Self::UPSTREAM, e))?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(
                Self::UPSTREAM.to_string(),
                response.status().as_u16(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let base = reqwest::Url::parse("http://localhost:5001/").unwrap();
        assert_eq!(endpoint(&base, "/api/dictionary"), "http://localhost:5001/api/dictionary");
        let base = reqwest::Url::parse("http://gateway/dictionary").unwrap();
        assert_eq!(endpoint(&base, "/api/dictionary"), "http://gateway/dictionary/api/dictionary");
    }
}
