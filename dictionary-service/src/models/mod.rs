pub mod entry;

pub use entry::{DictionaryEntry, WordLanguage};
