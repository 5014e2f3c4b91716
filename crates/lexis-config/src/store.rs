use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> String {
    ".lexis".to_string()
}

fn default_persistent() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct StoreConfig {
    /// Root for collection files and profiles
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// When false everything lives in memory for the process lifetime
    #[serde(default = "default_persistent")]
    pub persistent: bool,
}

impl StoreConfig {
    pub fn new() -> Self {
        let data_dir = env::var("LEXIS_DATA_DIR").unwrap_or_else(|_| default_data_dir());

        Self {
            data_dir,
            persistent: default_persistent(),
        }
    }

    pub fn collection_path(&self, name: &str) -> PathBuf {
        PathBuf::from(&self.data_dir).join(format!("{name}.json"))
    }

    pub fn profiles_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("profiles")
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            persistent: default_persistent(),
        }
    }
}
