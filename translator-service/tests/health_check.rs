mod common;

use common::{TestApp, Upstreams};

#[tokio::test]
async fn health_check_works_without_upstreams() {
    let upstreams = Upstreams::start().await;
    let app = TestApp::spawn_with_mock_provider(&upstreams).await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "translator-service");

    let ready = app
        .client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(ready.status(), 200);
}
