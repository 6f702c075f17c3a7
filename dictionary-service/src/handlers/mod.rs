pub mod dictionary;

pub use dictionary::{create_entry, lookup_word, search_entries};
