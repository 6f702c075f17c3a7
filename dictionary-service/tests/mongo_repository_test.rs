use dictionary_service::models::{DictionaryEntry, WordLanguage};
use dictionary_service::services::{DictionaryDb, DictionaryRepository};
use service_core::config::MongoConfig;
use service_core::db::MongoDb;
use service_core::error::AppError;
use service_core::extract::Page;

#[tokio::test]
#[ignore] // Requires MongoDB
async fn mongo_repository_round_trip() {
    let uri = std::env::var("TEST_MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let database = format!("dictionary_test_{}", uuid::Uuid::new_v4());
    let config = MongoConfig::new(uri, database.clone()).unwrap();

    let db = MongoDb::connect(&config, "dictionary-service-test")
        .await
        .unwrap();
    let repo = DictionaryDb::new(db.clone());
    repo.initialize_indexes().await.unwrap();

    let entry = DictionaryEntry::new("Kiri".to_string(), "milk".to_string());
    repo.insert(&entry).await.unwrap();

    let duplicate = DictionaryEntry::new("Kiri".to_string(), "milk".to_string());
    assert!(matches!(
        repo.insert(&duplicate).await,
        Err(AppError::Conflict(_))
    ));

    let found = repo
        .find_word("kiri", WordLanguage::Vedda)
        .await
        .unwrap()
        .expect("entry should be found");
    assert_eq!(found.id, entry.id);

    let results = repo
        .search_prefix("mi", WordLanguage::English, Page::default())
        .await
        .unwrap();
    assert_eq!(results.len(), 1);

    let _ = db.client().database(&database).drop(None).await;
}
