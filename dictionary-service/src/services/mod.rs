pub mod database;
pub mod memory;
pub mod repository;

pub use database::DictionaryDb;
pub use memory::InMemoryDictionary;
pub use repository::DictionaryRepository;
