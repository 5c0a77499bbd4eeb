mod core;
mod backend;
mod config;

pub use crate::core::{Appended, Ledger, LedgerError, LedgerResult, Pool, PoolStatus, Transaction, TransactionType};
pub use crate::core::{ledger, metrics, pool, transaction};
pub use crate::backend::{JsonStore, MemoryStore, Store, StoreError};
pub use crate::config::{AppConfig, StorageConfig};
