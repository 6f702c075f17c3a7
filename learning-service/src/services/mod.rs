pub mod classifier;
pub mod database;
pub mod memory;
pub mod repository;

pub use classifier::{load_classifier, MistakeClassifier};
pub use database::MistakeDb;
pub use memory::InMemoryMistakes;
pub use repository::{CategoryCounts, MistakeRepository};
