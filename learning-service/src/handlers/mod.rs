pub mod classify;
pub mod mistakes;

pub use classify::classify_text;
pub use mistakes::{list_mistakes, record_mistake, summarize_mistakes};
