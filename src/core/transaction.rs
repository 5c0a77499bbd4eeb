use serde::{Serialize, Deserialize};
use colored::Colorize;
use uuid::Uuid;

pub type Amount = f64;

/// Unix epoch milliseconds. Caller-supplied, so records may be backdated.
pub type Timestamp = i64;

pub const INITIAL_INVESTMENT_NOTE: &str = "Initial Investment";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Fee,
    Withdraw
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let disp = match self {
            Self::Deposit => "DEPOSIT",
            Self::Fee => "FEE",
            Self::Withdraw => "WITHDRAW"
        };
        write!(f, "{}", disp)
    }
}

/// Immutable event record against a pool. Never edited or deleted once
/// appended; corrections happen by appending further events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub pool_id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Amount,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.to_string().bold(), self.amount)?;
        if let Some(notes) = &self.notes {
            write!(f, " ({})", notes)?;
        }
        return Ok(());
    }
}

impl Transaction {
    pub fn new(pool_id: Uuid, kind: TransactionType, amount: Amount, timestamp: Timestamp, notes: Option<String>) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            pool_id,
            kind,
            amount,
            timestamp,
            notes }
    }

    /// The DEPOSIT synthesized alongside every new pool.
    pub fn initial_deposit(pool_id: Uuid, amount: Amount, timestamp: Timestamp) -> Transaction {
        Transaction::new(pool_id, TransactionType::Deposit, amount, timestamp,
            Some(INITIAL_INVESTMENT_NOTE.to_owned()))
    }
}


#[cfg(test)]
mod tests {
    use crate::{Transaction, transaction::TransactionType};
    use colored;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    #[case(TransactionType::Deposit, "DEPOSIT")]
    #[case(TransactionType::Fee, "FEE")]
    #[case(TransactionType::Withdraw, "WITHDRAW")]
    fn type_display(#[case] kind: TransactionType, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }

    #[rstest]
    fn can_print() {
        colored::control::set_override(false);
        let pool_id = Uuid::new_v4();

        let transaction = Transaction::new(pool_id, TransactionType::Fee, 12.5, 1700000000000, None);
        assert_eq!(transaction.to_string(), "FEE: 12.5");

        let noted = Transaction::new(pool_id, TransactionType::Deposit, 100.0, 1700000000000,
            Some("weekly top-up".to_owned()));
        assert_eq!(noted.to_string(), "DEPOSIT: 100 (weekly top-up)");
    }

    #[rstest]
    fn initial_deposit_is_annotated() {
        let pool_id = Uuid::new_v4();
        let transaction = Transaction::initial_deposit(pool_id, 1000.0, 42);

        assert_eq!(transaction.pool_id, pool_id);
        assert_eq!(transaction.kind, TransactionType::Deposit);
        assert_eq!(transaction.amount, 1000.0);
        assert_eq!(transaction.timestamp, 42);
        assert_eq!(transaction.notes.as_deref(), Some("Initial Investment"));
    }

    #[rstest]
    fn distinct_ids() {
        let pool_id = Uuid::new_v4();
        let a = Transaction::new(pool_id, TransactionType::Fee, 1.0, 0, None);
        let b = Transaction::new(pool_id, TransactionType::Fee, 1.0, 0, None);
        assert_ne!(a.id, b.id);
    }
}
