mod common;

use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn created_entry_can_be_looked_up_by_vedda_word() {
    let app = TestApp::spawn().await;

    let response = app
        .create_entry(json!({ "vedda_word": "X", "english_word": "Y" }))
        .await;
    assert_eq!(response.status(), 201);

    let response = app.lookup(&[("word", "X")]).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["english_word"], "Y");
    assert_eq!(body["vedda_word"], "X");
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn lookup_by_english_word() {
    let app = TestApp::spawn().await;
    app.create_entry(json!({
        "vedda_word": "kiri",
        "english_word": "milk",
        "sinhala_word": "කිරි",
        "vedda_ipa": "kiɾi"
    }))
    .await;

    let response = app.lookup(&[("word", "Milk"), ("from", "english")]).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["vedda_word"], "kiri");
    assert_eq!(body["vedda_ipa"], "kiɾi");

    let response = app.lookup(&[("word", "කිරි"), ("from", "si")]).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn unknown_word_is_an_explicit_not_found() {
    let app = TestApp::spawn().await;

    let response = app.lookup(&[("word", "nothing")]).await;
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Word 'nothing' not found");
}

#[tokio::test]
async fn missing_or_blank_word_is_a_bad_request() {
    let app = TestApp::spawn().await;

    assert_eq!(app.lookup(&[]).await.status(), 400);
    assert_eq!(app.lookup(&[("word", "   ")]).await.status(), 400);
}

#[tokio::test]
async fn unsupported_language_is_a_bad_request() {
    let app = TestApp::spawn().await;

    let response = app.lookup(&[("word", "kiri"), ("from", "klingon")]).await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Invalid query string"));
}

#[tokio::test]
async fn duplicate_entry_conflicts() {
    let app = TestApp::spawn().await;
    let entry = json!({ "vedda_word": "pojja", "english_word": "pot" });

    assert_eq!(app.create_entry(entry.clone()).await.status(), 201);
    assert_eq!(app.create_entry(entry).await.status(), 409);
}

#[tokio::test]
async fn invalid_entries_are_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .create_entry(json!({ "vedda_word": "", "english_word": "pot" }))
        .await;
    assert_eq!(response.status(), 422);

    let response = app
        .create_entry(json!({ "vedda_word": "  ", "english_word": "pot" }))
        .await;
    assert_eq!(response.status(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["details"].as_str().unwrap().contains("vedda_word"));

    let response = app.create_entry(json!({ "vedda_word": 7 })).await;
    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn prefix_search_returns_matching_entries() {
    let app = TestApp::spawn().await;
    for (vedda, english) in [("pata", "leaf"), ("pena", "fog"), ("kiri", "milk")] {
        app.create_entry(json!({ "vedda_word": vedda, "english_word": english }))
            .await;
    }

    let response = app.search(&[("q", "p")]).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["count"], 2);
    assert_eq!(body["entries"][0]["vedda_word"], "pata");
    assert_eq!(body["entries"][1]["vedda_word"], "pena");

    let response = app.search(&[("q", "f"), ("from", "english")]).await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["entries"][0]["english_word"], "fog");
}
