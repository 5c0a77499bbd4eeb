use thiserror::Error;
use uuid::Uuid;

use crate::backend::StoreError;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Occurs when an operation references a pool id
    /// that does not exist in the stored collection.
    #[error("no such pool: {0}")]
    PoolNotFound(Uuid),
    /// A write against the underlying store failed. Reads never
    /// surface here; a missing or corrupt collection reads as empty.
    #[error(transparent)]
    Store(#[from] StoreError)
}

pub type LedgerResult<T> = Result<T, LedgerError>;
