pub mod interface;
pub mod json_store;
pub mod memory;

pub use interface::{Store, Result, StoreError};
pub use json_store::JsonStore;
pub use memory::MemoryStore;
