use std::{fs, path::{Path, PathBuf}};
use serde::{Serialize, Deserialize};
use toml;
use anyhow::{self, Context};

use crate::backend::JsonStore;
use crate::backend::json_store::{POOLS_FILE, TRANSACTIONS_FILE};

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    pub pools_file: PathBuf,
    pub transactions_file: PathBuf
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig
}

impl AppConfig {
    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(filepath)
            .with_context(|| "failed to read config file")?;
        let config = toml::from_str(&file_content)
            .with_context(|| "failed to parse config file")?;
        return Ok(config);
    }

    /// Default layout: both collection files inside one data directory.
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        AppConfig {
            storage: StorageConfig {
                pools_file: dir.as_ref().join(POOLS_FILE),
                transactions_file: dir.as_ref().join(TRANSACTIONS_FILE)
            }
        }
    }

    pub fn open_store(&self) -> JsonStore {
        JsonStore::from_paths(self.storage.pools_file.clone(), self.storage.transactions_file.clone())
    }
}
