use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::backend::interface::{Result, Store};
use crate::core::{Pool, Transaction};

pub const POOLS_FILE: &str = "pools.json";
pub const TRANSACTIONS_FILE: &str = "transactions.json";

/// Store backed by one JSON document per collection. Every save rewrites
/// the whole file, so the last write wins and readers never see a
/// partially updated collection.
pub struct JsonStore {
    pools_path: PathBuf,
    transactions_path: PathBuf
}

impl JsonStore {
    pub fn new(dir: impl AsRef<Path>) -> JsonStore {
        JsonStore {
            pools_path: dir.as_ref().join(POOLS_FILE),
            transactions_path: dir.as_ref().join(TRANSACTIONS_FILE)
        }
    }

    pub fn from_paths(pools_path: PathBuf, transactions_path: PathBuf) -> JsonStore {
        JsonStore { pools_path, transactions_path }
    }

    fn load_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("could not read {}, treating as empty: {}", path.display(), err);
                }
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(items) => items,
            Err(err) => {
                warn!("could not parse {}, treating as empty: {}", path.display(), err);
                Vec::new()
            }
        }
    }

    fn save_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)?,
            _ => ()
        }
        let content = serde_json::to_string_pretty(items)?;
        fs::write(path, content)?;
        debug!("wrote {} records to {}", items.len(), path.display());
        return Ok(());
    }
}

impl Store for JsonStore {
    fn load_pools(&self) -> Vec<Pool> {
        JsonStore::load_collection(&self.pools_path)
    }

    fn save_pools(&self, pools: &[Pool]) -> Result<()> {
        JsonStore::save_collection(&self.pools_path, pools)
    }

    fn load_transactions(&self) -> Vec<Transaction> {
        JsonStore::load_collection(&self.transactions_path)
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        JsonStore::save_collection(&self.transactions_path, transactions)
    }
}


#[cfg(test)]
mod tests {
    use crate::core::{Pool, PoolStatus, Transaction};
    use crate::core::transaction::TransactionType;
    use crate::backend::{JsonStore, Store};

    use rstest::{fixture, rstest};
    use serde_json::json;
    use uuid::Uuid;

    fn pool_id() -> Uuid {
        Uuid::parse_str("5f0c9f04-36e9-4d53-9aae-f79f0d3e1a11").unwrap()
    }

    #[fixture]
    fn pool() -> Pool {
        Pool {
            id: pool_id(),
            pair_name: "ETH/USDC".to_owned(),
            status: PoolStatus::Active,
            created_at: 1700000000000,
            closed_at: None,
            total_invested: 1000.0,
            total_fees: 50.0,
            current_roi: 5.0
        }
    }

    #[fixture]
    fn pool_json() -> serde_json::Value {
        json!({
            "id": "5f0c9f04-36e9-4d53-9aae-f79f0d3e1a11",
            "pairName": "ETH/USDC",
            "status": "ACTIVE",
            "createdAt": 1700000000000i64,
            "totalInvested": 1000.0,
            "totalFees": 50.0,
            "currentROI": 5.0
        })
    }

    #[fixture]
    fn transaction() -> Transaction {
        Transaction {
            id: Uuid::parse_str("9b2f3c60-11b8-4f86-8a3c-2d5d3f8f7a22").unwrap(),
            pool_id: pool_id(),
            kind: TransactionType::Deposit,
            amount: 1000.0,
            timestamp: 1700000000000,
            notes: Some("Initial Investment".to_owned())
        }
    }

    #[fixture]
    fn transaction_json() -> serde_json::Value {
        json!({
            "id": "9b2f3c60-11b8-4f86-8a3c-2d5d3f8f7a22",
            "poolId": "5f0c9f04-36e9-4d53-9aae-f79f0d3e1a11",
            "type": "DEPOSIT",
            "amount": 1000.0,
            "timestamp": 1700000000000i64,
            "notes": "Initial Investment"
        })
    }

    #[rstest]
    fn pool_serialize(pool: Pool, pool_json: serde_json::Value) {
        let value = serde_json::to_value(&pool).unwrap();
        assert_eq!(value, pool_json);
    }

    #[rstest]
    fn pool_deserialize(pool: Pool, pool_json: serde_json::Value) {
        let parsed = serde_json::from_value::<Pool>(pool_json).unwrap();
        assert_eq!(parsed, pool);
    }

    #[rstest]
    fn closed_pool_serializes_closed_at(mut pool: Pool) {
        pool.close(1700000100000);
        let value = serde_json::to_value(&pool).unwrap();
        assert_eq!(value["status"], "CLOSED");
        assert_eq!(value["closedAt"], 1700000100000i64);
    }

    #[rstest]
    fn transaction_serialize(transaction: Transaction, transaction_json: serde_json::Value) {
        let value = serde_json::to_value(&transaction).unwrap();
        assert_eq!(value, transaction_json);
    }

    #[rstest]
    fn bare_transaction_omits_notes(transaction: Transaction) {
        let bare = Transaction { notes: None, ..transaction };
        let value = serde_json::to_value(&bare).unwrap();
        assert!(value.get("notes").is_none());
    }

    #[rstest]
    fn transaction_deserialize(transaction: Transaction, transaction_json: serde_json::Value) {
        let parsed = serde_json::from_value::<Transaction>(transaction_json).unwrap();
        assert_eq!(parsed, transaction);
    }

    #[rstest]
    fn round_trip_preserves_order_and_content(pool: Pool, transaction: Transaction) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let mut second = Pool::new("BTC/USDT", 200.0, 1700000001000);
        second.close(1700000002000);
        let pools = vec![second, pool];
        let transactions = vec![transaction.clone(),
            Transaction::new(transaction.pool_id, TransactionType::Fee, 50.0, 1700000003000, None)];

        store.save_pools(&pools).unwrap();
        store.save_transactions(&transactions).unwrap();

        assert_eq!(store.load_pools(), pools);
        assert_eq!(store.load_transactions(), transactions);
    }

    #[rstest]
    fn missing_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nowhere"));

        assert!(store.load_pools().is_empty());
        assert!(store.load_transactions().is_empty());
    }

    #[rstest]
    fn corrupt_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pools.json"), "{not json").unwrap();
        std::fs::write(dir.path().join("transactions.json"), "42").unwrap();

        let store = JsonStore::new(dir.path());
        assert!(store.load_pools().is_empty());
        assert!(store.load_transactions().is_empty());
    }
}
