use serde::Serialize;

use crate::core::pool::{self, Pool};
use crate::core::transaction::{Amount, Timestamp, Transaction, TransactionType};

/// Dashboard aggregates over the ACTIVE pools only; closed positions
/// belong to the history view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub total_invested: Amount,
    pub total_earnings: Amount,
    pub average_roi: Amount,
    pub active_pools: usize
}

pub fn summary(pools: &[Pool]) -> Summary {
    let active = pools.iter().filter(|p| p.is_active());
    let (mut total_invested, mut total_earnings, mut active_pools) = (0.0, 0.0, 0);
    for p in active {
        total_invested += p.total_invested;
        total_earnings += p.total_fees;
        active_pools += 1;
    }
    Summary {
        total_invested,
        total_earnings,
        average_roi: pool::roi(total_earnings, total_invested),
        active_pools
    }
}

/// One point of a pool's cumulative fee curve.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeePoint {
    pub timestamp: Timestamp,
    pub amount: Amount,
    pub cumulative: Amount
}

/// FEE events only, oldest first, with a running total. Input order does
/// not matter; the series is re-sorted by timestamp.
pub fn fee_history(transactions: &[Transaction]) -> Vec<FeePoint> {
    let mut fees: Vec<&Transaction> = transactions.iter()
        .filter(|t| t.kind == TransactionType::Fee)
        .collect();
    fees.sort_by_key(|t| t.timestamp);

    let mut running_total = 0.0;
    fees.into_iter().map(|t| {
        running_total += t.amount;
        FeePoint { timestamp: t.timestamp, amount: t.amount, cumulative: running_total }
    }).collect()
}
