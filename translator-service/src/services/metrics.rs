//! Domain counters for translator-service.

use super::translation::TranslationMethod;

pub fn record_translation(method: TranslationMethod) {
    metrics::counter!("translations_total", "method" => method.as_str()).increment(1);
}

pub fn record_upstream_failure(upstream: &'static str) {
    metrics::counter!("translation_upstream_failures_total", "upstream" => upstream).increment(1);
}

pub fn record_history_failure() {
    metrics::counter!("translation_history_failures_total").increment(1);
}
