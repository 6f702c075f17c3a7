use crate::models::{Model3d, ModelFormat};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::extract::{not_blank, optional_text};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateModelRequest {
    #[validate(
        length(min = 1, max = 200, message = "name must be 1-200 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(
        length(min = 1, max = 100, message = "category must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub category: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(url(message = "file_url must be a valid URL"))]
    pub file_url: String,
    pub format: ModelFormat,
    #[validate(url(message = "thumbnail_url must be a valid URL"))]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20, message = "at most 20 tags"))]
    pub tags: Vec<String>,
}

impl CreateModelRequest {
    pub fn into_model(self) -> Model3d {
        let mut model = Model3d::new(
            self.name.trim().to_string(),
            self.category.trim().to_string(),
            self.file_url,
            self.format,
        );
        model.description = optional_text(self.description);
        model.thumbnail_url = self.thumbnail_url;
        model.tags = self
            .tags
            .into_iter()
            .filter_map(|t| optional_text(Some(t)))
            .collect();
        model
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelResponse {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub file_url: String,
    pub format: ModelFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Model3d> for ModelResponse {
    fn from(model: Model3d) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            description: model.description,
            file_url: model.file_url,
            format: model.format,
            thumbnail_url: model.thumbnail_url,
            tags: model.tags,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelListResponse {
    pub models: Vec<ModelResponse>,
    pub count: usize,
}
