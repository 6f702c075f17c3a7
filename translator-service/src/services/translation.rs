//! Strategy selection between the dictionary and the external API.

use super::clients::DictionaryClient;
use super::providers::TranslationProvider;
use super::UpstreamError;
use crate::models::Language;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationMethod {
    /// Word-by-word through the dictionary only.
    Dictionary,
    /// Dictionary and external API chained through English.
    Hybrid,
    /// A single external API call.
    Api,
}

impl TranslationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationMethod::Dictionary => "dictionary",
            TranslationMethod::Hybrid => "hybrid",
            TranslationMethod::Api => "api",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub method: TranslationMethod,
    /// Words the dictionary did not know, kept verbatim in `text`.
    pub unknown_words: Vec<String>,
}

pub struct Translator {
    provider: Arc<dyn TranslationProvider>,
    dictionary: Arc<dyn DictionaryClient>,
}

impl Translator {
    pub fn new(provider: Arc<dyn TranslationProvider>, dictionary: Arc<dyn DictionaryClient>) -> Self {
        Self {
            provider,
            dictionary,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Translates `text`. Holds no state between calls, so the same input
    /// always produces the same requests upstream. `request_id` is passed
    /// on to every dictionary lookup.
    pub async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
        request_id: Option<&str>,
    ) -> Result<Translation, UpstreamError> {
        if source.dictionary_only() {
            let (english, unknown_words) = self
                .word_by_word(text, Language::Vedda, request_id)
                .await?;
            if target == Language::English {
                return Ok(Translation {
                    text: english,
                    method: TranslationMethod::Dictionary,
                    unknown_words,
                });
            }
            let text = self.call_api(&english, Language::English, target).await?;
            return Ok(Translation {
                text,
                method: TranslationMethod::Hybrid,
                unknown_words,
            });
        }

        if target.dictionary_only() {
            let (english, method) = if source == Language::English {
                (text.to_string(), TranslationMethod::Dictionary)
            } else {
                (
                    self.call_api(text, source, Language::English).await?,
                    TranslationMethod::Hybrid,
                )
            };
            let (vedda, unknown_words) = self
                .word_by_word(&english, Language::English, request_id)
                .await?;
            return Ok(Translation {
                text: vedda,
                method,
                unknown_words,
            });
        }

        Ok(Translation {
            text: self.call_api(text, source, target).await?,
            method: TranslationMethod::Api,
            unknown_words: Vec::new(),
        })
    }

    async fn call_api(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, UpstreamError> {
        self.provider
            .translate(text, source, target)
            .await
            .inspect_err(|e| {
                tracing::warn!(provider = self.provider.name(), error = %e, "External translation failed");
                super::metrics::record_upstream_failure("translation_api");
            })
    }

    /// Replaces each word with its dictionary counterpart (Vedda <-> English).
    /// Each distinct word is looked up once per call.
    async fn word_by_word(
        &self,
        text: &str,
        from: Language,
        request_id: Option<&str>,
    ) -> Result<(String, Vec<String>), UpstreamError> {
        let mut known: HashMap<String, Option<String>> = HashMap::new();
        let mut unknown_words: Vec<String> = Vec::new();
        let mut output: Vec<String> = Vec::new();

        for token in text.split_whitespace() {
            let (lead, word, trail) = split_punctuation(token);
            if word.is_empty() {
                output.push(token.to_string());
                continue;
            }

            let key = word.to_lowercase();
            let translated = match known.get(&key) {
                Some(hit) => hit.clone(),
                None => {
                    let found = self
                        .dictionary
                        .lookup(word, from, request_id)
                        .await
                        .inspect_err(|_| super::metrics::record_upstream_failure("dictionary"))?
                        .map(|entry| {
                            if from == Language::Vedda {
                                entry.english_word
                            } else {
                                entry.vedda_word
                            }
                        });
                    known.insert(key, found.clone());
                    found
                }
            };

            match translated {
                Some(replacement) => output.push(format!("{}{}{}", lead, replacement, trail)),
                None => {
                    if !unknown_words.iter().any(|w| w == word) {
                        unknown_words.push(word.to_string());
                    }
                    output.push(token.to_string());
                }
            }
        }

        Ok((output.join(" "), unknown_words))
    }
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || matches!(c, '“' | '”' | '‘' | '’' | '…' | '«' | '»')
}

/// Splits leading and trailing punctuation off a whitespace-delimited token.
fn split_punctuation(token: &str) -> (&str, &str, &str) {
    let rest = token.trim_start_matches(is_punctuation);
    let start = token.len() - rest.len();
    let word = rest.trim_end_matches(is_punctuation);
    let end = start + word.len();
    (&token[..start], word, &token[end..])
}
