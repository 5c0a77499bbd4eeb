use std::cell::RefCell;

use crate::backend::interface::{Result, Store};
use crate::core::{Pool, Transaction};

/// Store kept entirely in memory. Backs the test suite and any embedding
/// that does not want files; single-threaded like the rest of the crate.
#[derive(Default)]
pub struct MemoryStore {
    pools: RefCell<Vec<Pool>>,
    transactions: RefCell<Vec<Transaction>>
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl Store for MemoryStore {
    fn load_pools(&self) -> Vec<Pool> {
        self.pools.borrow().clone()
    }

    fn save_pools(&self, pools: &[Pool]) -> Result<()> {
        *self.pools.borrow_mut() = pools.to_vec();
        return Ok(());
    }

    fn load_transactions(&self) -> Vec<Transaction> {
        self.transactions.borrow().clone()
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        *self.transactions.borrow_mut() = transactions.to_vec();
        return Ok(());
    }
}
