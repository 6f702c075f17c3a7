mod common;

use learning_service::services::load_classifier;
use learning_service::startup;
use service_core::error::AppError;

#[test]
fn saved_pipeline_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mistakes.json");
    common::trained_pipeline().save(&path).unwrap();

    let classifier = load_classifier(&path).unwrap();
    assert_eq!(classifier.labels(), ["agreement", "spelling", "verb_tense"]);
    assert_eq!(classifier.classify("he eated rice").label, "verb_tense");
}

#[test]
fn unreadable_model_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    assert!(matches!(load_classifier(&missing), Err(AppError::ConfigError(_))));

    let corrupt = dir.path().join("corrupt.json");
    std::fs::write(&corrupt, "{\"labels\": 3}").unwrap();
    assert!(matches!(load_classifier(&corrupt), Err(AppError::ConfigError(_))));
}

#[test]
fn relabelled_model_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relabelled.json");
    let mut saved: serde_json::Value =
        serde_json::from_str(&common::trained_pipeline().to_json().unwrap()).unwrap();
    saved["labels"] = serde_json::json!(["a", "s"]);
    std::fs::write(&path, saved.to_string()).unwrap();

    assert!(matches!(load_classifier(&path), Err(AppError::ConfigError(_))));
}

#[tokio::test]
async fn startup_fails_when_configured_model_is_missing() {
    let mut config = common::test_config();
    config.classifier_model_path = Some("/nonexistent/classifier.json".into());

    let result = startup::build(config).await;
    assert!(matches!(result, Err(AppError::ConfigError(_))));
}
