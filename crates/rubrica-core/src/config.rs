//! Store configuration, kept in `.rubrica/config.toml`

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, RubricaError};
use crate::model::RubricType;

/// Current on-disk format version
pub const STORE_FORMAT_VERSION: u32 = 1;

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

/// Column layout of Canvas grade exports. Scores live at fixed positions;
/// the first two rows (column headers and points row) are not student data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Zero-based column of the first-delivery score
    pub e1_column: usize,
    /// Zero-based column of the second-delivery score
    pub e2_column: usize,
    /// Zero-based column of the final-delivery score
    pub ef_column: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        // Canvas exports lead with Student, ID, SIS User ID, SIS Login ID,
        // Section; assignment columns start right after.
        CanvasConfig {
            e1_column: 5,
            e2_column: 6,
            ef_column: 7,
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Rubric type assumed when a command does not specify one
    #[serde(default = "default_rubric_type")]
    pub default_rubric_type: RubricType,
    #[serde(default)]
    pub canvas: CanvasConfig,
}

fn default_rubric_type() -> RubricType {
    RubricType::Group
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            version: STORE_FORMAT_VERSION,
            default_rubric_type: default_rubric_type(),
            canvas: CanvasConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RubricaError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Options for initializing a new store
#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    /// Use the visible store directory (rubrica/ instead of .rubrica/)
    pub visible: bool,
}
