pub mod translate;

pub use translate::{list_languages, translate};
