use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::core::transaction::{Amount, Timestamp, Transaction, TransactionType};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoolStatus {
    Active,
    Closed
}

impl std::fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let disp = match self {
            Self::Active => "ACTIVE",
            Self::Closed => "CLOSED"
        };
        write!(f, "{}", disp)
    }
}

/// A tracked liquidity position.
///
/// `total_invested`, `total_fees` and `current_roi` are cached aggregates
/// over the pool's transaction history. They are updated on every append
/// by the ledger, never by anyone else; `Pool::folded_from` rebuilds them
/// from scratch when the cache is in doubt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: Uuid,
    pub pair_name: String,
    pub status: PoolStatus,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub closed_at: Option<Timestamp>,
    pub total_invested: Amount,
    pub total_fees: Amount,
    #[serde(rename = "currentROI")]
    pub current_roi: Amount
}

impl Pool {
    pub fn new(pair_name: &str, initial_investment: Amount, timestamp: Timestamp) -> Pool {
        Pool {
            id: Uuid::new_v4(),
            pair_name: pair_name.to_owned(),
            status: PoolStatus::Active,
            created_at: timestamp,
            closed_at: None,
            total_invested: initial_investment,
            total_fees: 0.0,
            current_roi: 0.0
        }
    }

    /// Fold one transaction into the cached aggregates.
    /// WITHDRAW carries no aggregate effect; the record still exists in
    /// the history and shows up in listings.
    pub fn apply(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionType::Deposit => self.total_invested += transaction.amount,
            TransactionType::Fee => self.total_fees += transaction.amount,
            TransactionType::Withdraw => ()
        }
        self.current_roi = roi(self.total_fees, self.total_invested);
    }

    /// Rebuild the cached aggregates from this pool's full history.
    /// The initial deposit is part of the history, so the fold starts
    /// from zero, not from the creation investment.
    pub fn folded_from<'a>(mut self, transactions: impl Iterator<Item = &'a Transaction>) -> Pool {
        self.total_invested = 0.0;
        self.total_fees = 0.0;
        self.current_roi = 0.0;
        let pool_id = self.id;
        for transaction in transactions.filter(|t| t.pool_id == pool_id) {
            self.apply(transaction);
        }
        return self;
    }

    pub fn close(&mut self, timestamp: Timestamp) {
        self.status = PoolStatus::Closed;
        self.closed_at = Some(timestamp);
    }

    pub fn is_active(&self) -> bool {
        self.status == PoolStatus::Active
    }

    /// Age of the position in whole days, up to `closed_at` for closed
    /// pools or to `now` for active ones.
    pub fn duration_days(&self, now: Timestamp) -> i64 {
        let end = self.closed_at.unwrap_or(now);
        (end - self.created_at) / (24 * 60 * 60 * 1000)
    }
}

pub fn roi(fees: Amount, invested: Amount) -> Amount {
    if invested > 0.0 {
        fees / invested * 100.0
    } else {
        0.0
    }
}
