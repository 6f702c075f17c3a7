pub mod artifacts;
pub mod models;

pub use artifacts::{create_artifact, delete_artifact, get_artifact, list_artifacts};
pub use models::{create_model, delete_model, get_model, list_models};
