pub mod database;
pub mod memory;
pub mod repository;

pub use database::HistoryDb;
pub use memory::InMemoryHistory;
pub use repository::HistoryRepository;
