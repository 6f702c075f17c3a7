pub mod memory;

pub use memory::MemoryCollection;
