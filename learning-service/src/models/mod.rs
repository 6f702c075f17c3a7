pub mod mistake;

pub use mistake::{Mistake, UNCLASSIFIED};
