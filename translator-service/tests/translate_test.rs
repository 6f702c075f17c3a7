mod common;

use common::{TestApp, Upstreams};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn mount_word(upstreams: &Upstreams, word: &str, from: &str, vedda: &str, english: &str) {
    Mock::given(method("GET"))
        .and(path("/api/dictionary"))
        .and(query_param("word", word))
        .and(query_param("from", from))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "6d4c2c1e-0000-0000-0000-000000000000",
            "vedda_word": vedda,
            "english_word": english,
            "created_at": "2024-01-01T00:00:00Z"
        })))
        .mount(&upstreams.dictionary)
        .await;
}

async fn accept_history(upstreams: &Upstreams, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(201))
        .expect(expected_calls)
        .mount(&upstreams.history)
        .await;
}

#[tokio::test]
async fn vedda_to_english_is_served_from_the_dictionary() {
    let upstreams = Upstreams::start().await;
    mount_word(&upstreams, "kiri", "vedda", "kiri", "milk").await;
    accept_history(&upstreams, 1).await;
    let app = TestApp::spawn(&upstreams).await;

    let response = app
        .translate(json!({
            "text": "kiri gala",
            "source_language": "vedda",
            "target_language": "english"
        }))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["translated_text"], "milk gala");
    assert_eq!(body["method"], "dictionary");
    assert_eq!(body["source_language"], "vedda");
    assert_eq!(body["target_language"], "en");
    assert_eq!(body["unknown_words"], json!(["gala"]));

    let api_calls = upstreams.translation_api.received_requests().await.unwrap();
    assert!(api_calls.is_empty());
}

#[tokio::test]
async fn history_entry_describes_the_translation() {
    let upstreams = Upstreams::start().await;
    mount_word(&upstreams, "kiri", "vedda", "kiri", "milk").await;
    accept_history(&upstreams, 1).await;
    let app = TestApp::spawn(&upstreams).await;

    app.translate(json!({
        "text": "kiri",
        "source_language": "vedda",
        "target_language": "en"
    }))
    .await;

    let requests = upstreams.history.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let record: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(record["source_text"], "kiri");
    assert_eq!(record["translated_text"], "milk");
    assert_eq!(record["method"], "dictionary");
    assert_eq!(record["metadata"]["provider"], "google");
}

#[tokio::test]
async fn inbound_request_id_reaches_dictionary_and_history() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dictionary"))
        .and(query_param("word", "kiri"))
        .and(header("x-request-id", "rid-translate-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vedda_word": "kiri",
            "english_word": "milk"
        })))
        .expect(1)
        .mount(&upstreams.dictionary)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/history"))
        .and(header("x-request-id", "rid-translate-1"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&upstreams.history)
        .await;
    let app = TestApp::spawn(&upstreams).await;

    let response = app
        .client
        .post(format!("{}/api/translate", app.address))
        .header("x-request-id", "rid-translate-1")
        .json(&json!({
            "text": "kiri",
            "source_language": "vedda",
            "target_language": "english"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["x-request-id"], "rid-translate-1");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["translated_text"], "milk");
    upstreams.dictionary.verify().await;
    upstreams.history.verify().await;
}

#[tokio::test]
async fn other_pairs_call_the_external_api_once() {
    let upstreams = Upstreams::start().await;
    accept_history(&upstreams, 1).await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("sl", "en"))
        .and(query_param("tl", "si"))
        .and(query_param("q", "hello"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([[["ආයුබෝවන්", "hello", null, null, 1]], null, "en"])),
        )
        .expect(1)
        .mount(&upstreams.translation_api)
        .await;
    let app = TestApp::spawn(&upstreams).await;

    let response = app
        .translate(json!({
            "text": "hello",
            "source_language": "English",
            "target_language": "Sinhala"
        }))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["translated_text"], "ආයුබෝවන්");
    assert_eq!(body["method"], "api");
    assert_eq!(body["unknown_words"], json!([]));
}

#[tokio::test]
async fn vedda_to_sinhala_is_hybrid() {
    let upstreams = Upstreams::start().await;
    mount_word(&upstreams, "kiri", "vedda", "kiri", "milk").await;
    accept_history(&upstreams, 1).await;
    let app = TestApp::spawn_with_mock_provider(&upstreams).await;

    let body: Value = app
        .translate(json!({
            "text": "kiri",
            "source_language": "vedda",
            "target_language": "si"
        }))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["method"], "hybrid");
    assert_eq!(body["translated_text"], "[en->si] milk");
}

#[tokio::test]
async fn english_to_vedda_uses_the_dictionary_in_reverse() {
    let upstreams = Upstreams::start().await;
    mount_word(&upstreams, "milk", "english", "kiri", "milk").await;
    accept_history(&upstreams, 1).await;
    let app = TestApp::spawn(&upstreams).await;

    let body: Value = app
        .translate(json!({
            "text": "milk.",
            "source_language": "en",
            "target_language": "vedda"
        }))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["translated_text"], "kiri.");
    assert_eq!(body["method"], "dictionary");
}

#[tokio::test]
async fn api_error_status_is_a_bad_gateway() {
    let upstreams = Upstreams::start().await;
    accept_history(&upstreams, 0).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstreams.translation_api)
        .await;
    let app = TestApp::spawn(&upstreams).await;

    let response = app
        .translate(json!({ "text": "hello", "source_language": "en", "target_language": "ta" }))
        .await;

    assert_eq!(response.status(), 502);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Bad Gateway"));
}

#[tokio::test]
async fn malformed_api_response_is_a_bad_gateway() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
        .mount(&upstreams.translation_api)
        .await;
    let app = TestApp::spawn(&upstreams).await;

    let response = app
        .translate(json!({ "text": "hello", "source_language": "en", "target_language": "si" }))
        .await;

    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn slow_api_is_a_gateway_timeout() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([[["late", "hello"]]]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&upstreams.translation_api)
        .await;
    let app = TestApp::spawn_with_timeout(&upstreams, Duration::from_millis(300), false).await;

    let response = app
        .translate(json!({ "text": "hello", "source_language": "en", "target_language": "si" }))
        .await;

    assert_eq!(response.status(), 504);
}

#[tokio::test]
async fn unreachable_dictionary_is_a_bad_gateway() {
    let upstreams = Upstreams::start().await;
    let gone = wiremock::MockServer::builder().start().await;
    let dictionary_url = reqwest::Url::parse(&gone.uri()).unwrap();
    drop(gone);
    let app =
        TestApp::spawn_against(&upstreams, dictionary_url, Duration::from_secs(5), true).await;

    let response = app
        .translate(json!({ "text": "kiri", "source_language": "vedda", "target_language": "en" }))
        .await;

    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn history_failure_does_not_fail_the_translation() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("POST"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&upstreams.history)
        .await;
    let app = TestApp::spawn_with_mock_provider(&upstreams).await;

    let response = app
        .translate(json!({ "text": "hello", "source_language": "en", "target_language": "si" }))
        .await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn history_can_be_skipped() {
    let upstreams = Upstreams::start().await;
    accept_history(&upstreams, 0).await;
    let app = TestApp::spawn_with_mock_provider(&upstreams).await;

    let response = app
        .translate(json!({
            "text": "hello",
            "source_language": "en",
            "target_language": "si",
            "record_history": false
        }))
        .await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn repeated_requests_give_the_same_answer() {
    let upstreams = Upstreams::start().await;
    mount_word(&upstreams, "kiri", "vedda", "kiri", "milk").await;
    let app = TestApp::spawn(&upstreams).await;
    let request = json!({
        "text": "kiri",
        "source_language": "vedda",
        "target_language": "en",
        "record_history": false
    });

    let first: Value = app.translate(request.clone()).await.json().await.unwrap();
    let second: Value = app.translate(request).await.json().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn bad_language_input_is_rejected() {
    let upstreams = Upstreams::start().await;
    let app = TestApp::spawn_with_mock_provider(&upstreams).await;

    let response = app
        .translate(json!({ "text": "hi", "source_language": "klingon", "target_language": "en" }))
        .await;
    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert!(body["details"].as_str().unwrap().contains("source_language"));

    let response = app
        .translate(json!({ "text": "hi", "source_language": "english", "target_language": "en" }))
        .await;
    assert_eq!(response.status(), 422);

    let response = app
        .translate(json!({ "text": "   ", "source_language": "en", "target_language": "si" }))
        .await;
    assert_eq!(response.status(), 422);

    let response = app
        .translate(json!({ "text": "", "source_language": "en", "target_language": "si" }))
        .await;
    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn supported_languages_are_listed() {
    let upstreams = Upstreams::start().await;
    let app = TestApp::spawn_with_mock_provider(&upstreams).await;

    let body: Value = app
        .client
        .get(format!("{}/api/translate/languages", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let codes: Vec<&str> = body["languages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["vedda", "en", "si", "ta"]);
}
