use crate::models::Artifact;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::extract::{not_blank, optional_text};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateArtifactRequest {
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
    #[validate(length(max = 100))]
    pub period: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub model_id: Option<String>,
    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: Option<String>,
}

impl CreateArtifactRequest {
    pub fn into_artifact(self) -> Artifact {
        let mut artifact = Artifact::new(
            self.name.trim().to_string(),
            self.category.trim().to_string(),
        );
        artifact.description = optional_text(self.description);
        artifact.period = optional_text(self.period);
        artifact.location = optional_text(self.location);
        artifact.model_id = optional_text(self.model_id);
        artifact.image_url = self.image_url;
        artifact
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArtifactResponse {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Artifact> for ArtifactResponse {
    fn from(a: Artifact) -> Self {
        Self {
            id: a.id,
            name: a.name,
            category: a.category,
            description: a.description,
            period: a.period,
            location: a.location,
            model_id: a.model_id,
            image_url: a.image_url,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArtifactListResponse {
    pub artifacts: Vec<ArtifactResponse>,
    pub count: usize,
}
