use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    Glb,
    Gltf,
    Obj,
    Fbx,
    Stl,
}

impl std::fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelFormat::Glb => write!(f, "glb"),
            ModelFormat::Gltf => write!(f, "gltf"),
            ModelFormat::Obj => write!(f, "obj"),
            ModelFormat::Fbx => write!(f, "fbx"),
            ModelFormat::Stl => write!(f, "stl"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model3d {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub file_url: String,
    pub format: ModelFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Model3d {
    pub fn new(name: String, category: String, file_url: String, format: ModelFormat) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            category,
            description: None,
            file_url,
            format,
            thumbnail_url: None,
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }
}
