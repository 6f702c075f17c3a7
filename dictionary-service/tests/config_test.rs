//! Startup configuration must fail fast. Kept in its own test binary because
//! it mutates process environment.

use dictionary_service::config::DictionaryConfig;

#[test]
fn missing_or_malformed_mongodb_uri_fails_to_load() {
    std::env::remove_var("MONGODB_URI");
    assert!(DictionaryConfig::load().is_err());

    std::env::set_var("MONGODB_URI", "localhost:27017");
    assert!(DictionaryConfig::load().is_err());

    std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");
    std::env::set_var("DATABASE_NAME", "dictionary_config_test");
    std::env::set_var("PORT", "6123");
    let config = DictionaryConfig::load().expect("valid configuration");
    assert_eq!(config.common.port, 6123);
    assert_eq!(config.mongodb.database, "dictionary_config_test");

    std::env::set_var("PORT", "not-a-port");
    assert!(DictionaryConfig::load().is_err());
}
