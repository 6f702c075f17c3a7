use learning_service::models::Mistake;
use learning_service::services::{MistakeDb, MistakeRepository};
use service_core::config::MongoConfig;
use service_core::db::MongoDb;
use service_core::extract::Page;

#[tokio::test]
#[ignore] // Requires MongoDB
async fn mongo_summary_groups_by_category() {
    let uri = std::env::var("TEST_MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let database = format!("learning_test_{}", std::process::id());
    let db = MongoDb::connect(&MongoConfig::new(uri, database.clone()).unwrap(), "learning-test")
        .await
        .unwrap();
    let repo = MistakeDb::new(db.clone());
    repo.initialize_indexes().await.unwrap();

    for (learner, category) in [("a", "spelling"), ("a", "spelling"), ("b", "agreement")] {
        let mut mistake = Mistake::new(learner.into(), "x".into(), "y".into());
        mistake.category = category.into();
        repo.insert(&mistake).await.unwrap();
    }

    let all = repo.summarize(None).await.unwrap();
    assert_eq!(all.get("spelling"), Some(&2));
    assert_eq!(all.get("agreement"), Some(&1));

    let for_a = repo.summarize(Some("a")).await.unwrap();
    assert_eq!(for_a.len(), 1);

    let listed = repo.list(Some("b"), Page::default()).await.unwrap();
    assert_eq!(listed.len(), 1);

    let _ = db.client().database(&database).drop(None).await;
}
