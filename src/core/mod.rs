pub mod pool;
pub mod transaction;
pub mod ledger;
pub mod metrics;
pub mod error;

pub use pool::{Pool, PoolStatus};
pub use transaction::{Transaction, TransactionType};
pub use ledger::{Appended, Ledger};
pub use error::{LedgerError, LedgerResult};
