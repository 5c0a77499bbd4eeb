use thiserror::Error;

use crate::core::{Pool, Transaction};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write collection: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error)
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Whole-collection persistence under two fixed logical keys.
///
/// The store knows nothing about domain rules: it hands back collections
/// in the order they were last written and overwrites them wholesale.
/// Loads must never fail — absent or unparseable data degrades to the
/// empty collection. Only writes may report an error.
pub trait Store {
    fn load_pools(&self) -> Vec<Pool>;
    fn save_pools(&self, pools: &[Pool]) -> Result<()>;
    fn load_transactions(&self) -> Vec<Transaction>;
    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()>;
}
