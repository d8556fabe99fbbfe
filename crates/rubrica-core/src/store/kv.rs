//! Typed key-value persistence: one pretty-printed JSON document per key

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A key-value layer over a store directory. Each key maps to a
/// `<key>.json` file holding one JSON document, written whole on every set.
#[derive(Debug)]
pub struct KvStore {
    root: PathBuf,
}

impl KvStore {
    pub fn new(root: &Path) -> Self {
        KvStore {
            root: root.to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Read the document under `key`, or `None` when it was never written
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key);
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Overwrite the document under `key`
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)?;
        fs::write(self.path_for(key), content)?;
        Ok(())
    }
}
