//! Shared MongoDB handle.
//!
//! One handle is opened per process and passed to repositories explicitly.

use crate::config::MongoConfig;
use crate::error::AppError;
use crate::server::ReadinessCheck;
use async_trait::async_trait;
use mongodb::{
    Client as MongoClient, Collection, Database, IndexModel,
    bson::{Document, doc},
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions},
};

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Parses the connection string and builds the client.
    ///
    /// A malformed URI is a configuration error. The driver connects lazily,
    /// so callers that need the server should follow up with [`MongoDb::ping`]
    /// or index creation.
    pub async fn connect(config: &MongoConfig, app_name: &str) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(config.uri.as_str())
            .await
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid MONGODB_URI: {}", e)))?;
        options.app_name = Some(app_name.to_string());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(&config.database);
        tracing::info!(database = %config.database, "MongoDB client initialized");
        Ok(Self { client, db })
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.db
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    pub async fn ensure_index(
        &self,
        collection: &str,
        keys: Document,
        name: &str,
        unique: bool,
    ) -> Result<(), AppError> {
        let index = IndexModel::builder()
            .keys(keys)
            .options(
                IndexOptions::builder()
                    .name(name.to_string())
                    .unique(unique)
                    .build(),
            )
            .build();

        self.collection::<Document>(collection)
            .create_index(index, None)
            .await
            .map_err(|e| {
                tracing::error!(collection, index = name, "Failed to create index: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }
}

#[async_trait]
impl ReadinessCheck for MongoDb {
    async fn ready(&self) -> Result<(), AppError> {
        self.ping().await
    }
}

pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// Case-insensitive anchored match on `value`, exact or as a prefix.
pub fn word_filter(field: &str, value: &str, prefix: bool) -> Document {
    let escaped = regex::escape(value.trim());
    let pattern = if prefix {
        format!("^{}", escaped)
    } else {
        format!("^{}$", escaped)
    };
    let mut filter = Document::new();
    filter.insert(field, doc! { "$regex": pattern, "$options": "i" });
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_filter_escapes_metacharacters() {
        let filter = word_filter("vedda_word", "a.b*", false);
        let inner = filter.get_document("vedda_word").unwrap();
        assert_eq!(inner.get_str("$regex").unwrap(), r"^a\.b\*$");
        assert_eq!(inner.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn word_filter_prefix_is_open_ended() {
        let filter = word_filter("english_word", " ho ", true);
        let inner = filter.get_document("english_word").unwrap();
        assert_eq!(inner.get_str("$regex").unwrap(), "^ho");
    }
}
