pub mod artifacts;
pub mod models;

pub use artifacts::{ArtifactListResponse, ArtifactResponse, CreateArtifactRequest};
pub use models::{CreateModelRequest, ModelListResponse, ModelResponse};

use serde::Deserialize;

/// Query string shared by both list routes.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<u64>,
}
