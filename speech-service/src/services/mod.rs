pub mod database;
pub mod memory;
pub mod repository;
pub mod storage;

pub use database::RecordingDb;
pub use memory::InMemoryRecordings;
pub use repository::RecordingRepository;
pub use storage::{LocalStorage, Storage};
