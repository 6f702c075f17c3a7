pub mod database;
pub mod memory;
pub mod repository;

pub use database::CatalogDb;
pub use memory::InMemoryCatalog;
pub use repository::CatalogRepository;
