pub mod artifact;
pub mod model3d;

pub use artifact::Artifact;
pub use model3d::{Model3d, ModelFormat};
