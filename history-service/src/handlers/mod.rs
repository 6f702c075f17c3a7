pub mod history;

pub use history::{create_entry, delete_entry, get_entry, list_entries};
