use std::cmp::Reverse;

use log::{debug, warn};
use uuid::Uuid;

use crate::backend::Store;
use crate::core::error::{LedgerError, LedgerResult};
use crate::core::metrics::{self, FeePoint, Summary};
use crate::core::pool::Pool;
use crate::core::transaction::{Amount, Timestamp, Transaction, TransactionType};

/// Outcome of an append. The transaction is recorded in both cases;
/// `Orphaned` means no pool matched the id, so no aggregates moved.
#[derive(Clone, Debug, PartialEq)]
pub enum Appended {
    Applied(Pool),
    Orphaned
}

/// The only writer of the pool and transaction collections.
///
/// Every operation is a fresh read-modify-write over the stored
/// collections; there is no in-memory state to invalidate, and callers
/// re-query after a mutation to observe it. Single-writer by contract:
/// two ledgers over the same store would clobber each other's writes,
/// so a concurrent host must serialize access externally.
pub struct Ledger<S: Store> {
    store: S
}

impl<S: Store> Ledger<S> {
    pub fn new(store: S) -> Ledger<S> {
        Ledger { store }
    }

    /// Pools in stored order, newest first.
    pub fn pools(&self) -> Vec<Pool> {
        return self.store.load_pools();
    }

    pub fn pool(&self, pool_id: Uuid) -> Option<Pool> {
        self.store.load_pools().into_iter()
            .find(|pool| pool.id == pool_id)
    }

    /// All transactions in insertion order, or one pool's history
    /// sorted most recent first.
    pub fn transactions(&self, filter_pool_id: Option<Uuid>) -> Vec<Transaction> {
        let all = self.store.load_transactions();
        match filter_pool_id {
            Some(pool_id) => {
                let mut matching: Vec<Transaction> = all.into_iter()
                    .filter(|transaction| transaction.pool_id == pool_id)
                    .collect();
                matching.sort_by_key(|transaction| Reverse(transaction.timestamp));
                matching
            },
            None => all
        }
    }

    /// Create a pool and its initial DEPOSIT in one step. The new pool is
    /// prepended so listings stay newest-first. Amount and pair name are
    /// taken as given; the view layer is expected to validate input.
    pub fn create_pool(&self, pair_name: &str, initial_investment: Amount, timestamp: Timestamp) -> LedgerResult<Pool> {
        let pool = Pool::new(pair_name, initial_investment, timestamp);
        let initial = Transaction::initial_deposit(pool.id, initial_investment, timestamp);

        let mut pools = self.store.load_pools();
        pools.insert(0, pool.clone());
        let mut transactions = self.store.load_transactions();
        transactions.push(initial);

        self.store.save_pools(&pools)?;
        self.store.save_transactions(&transactions)?;

        debug!("created pool {} ({})", pool.pair_name, pool.id);
        return Ok(pool);
    }

    /// Append a transaction and fold it into the owning pool's cached
    /// aggregates. The record is stored even when the pool id resolves
    /// to nothing; the `Orphaned` outcome tells the caller so.
    ///
    /// Transactions are written before pools. A crash between the two
    /// writes leaves a recorded transaction whose aggregate effect is
    /// missing, which `rebuild_metrics` repairs.
    pub fn add_transaction(&self, pool_id: Uuid, kind: TransactionType, amount: Amount, timestamp: Timestamp, notes: Option<String>) -> LedgerResult<Appended> {
        let transaction = Transaction::new(pool_id, kind, amount, timestamp, notes);

        let mut transactions = self.store.load_transactions();
        transactions.push(transaction.clone());
        self.store.save_transactions(&transactions)?;

        let mut pools = self.store.load_pools();
        match pools.iter_mut().find(|pool| pool.id == pool_id) {
            Some(pool) => {
                pool.apply(&transaction);
                let updated = pool.clone();
                self.store.save_pools(&pools)?;
                debug!("applied {} {} to pool {}", transaction.kind, transaction.amount, pool_id);
                Ok(Appended::Applied(updated))
            },
            None => {
                warn!("transaction {} stored against unknown pool {}", transaction.id, pool_id);
                Ok(Appended::Orphaned)
            }
        }
    }

    /// One-way ACTIVE -> CLOSED transition. Closing an already closed
    /// pool is a no-op that keeps the first closing timestamp.
    pub fn close_pool(&self, pool_id: Uuid, timestamp: Timestamp) -> LedgerResult<Pool> {
        let mut pools = self.store.load_pools();
        match pools.iter_mut().find(|pool| pool.id == pool_id) {
            Some(pool) => {
                if !pool.is_active() {
                    return Ok(pool.clone());
                }
                pool.close(timestamp);
                let closed = pool.clone();
                self.store.save_pools(&pools)?;
                debug!("closed pool {}", pool_id);
                Ok(closed)
            },
            None => Err(LedgerError::PoolNotFound(pool_id))
        }
    }

    /// Refold every pool's cached aggregates from the full transaction
    /// history and rewrite the pool collection. The recovery path for a
    /// cache that desynced from the history (e.g. an interrupted append).
    pub fn rebuild_metrics(&self) -> LedgerResult<Vec<Pool>> {
        let transactions = self.store.load_transactions();
        let pools: Vec<Pool> = self.store.load_pools().into_iter()
            .map(|pool| pool.folded_from(transactions.iter()))
            .collect();

        self.store.save_pools(&pools)?;
        return Ok(pools);
    }

    /// Dashboard aggregates over the ACTIVE pools.
    pub fn summary(&self) -> Summary {
        metrics::summary(&self.pools())
    }

    /// Cumulative FEE series for one pool, oldest first.
    pub fn fee_history(&self, pool_id: Uuid) -> Vec<FeePoint> {
        metrics::fee_history(&self.transactions(Some(pool_id)))
    }
}
