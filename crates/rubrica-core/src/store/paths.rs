//! Store directory layout and discovery

use std::path::{Path, PathBuf};

use crate::error::{Result, RubricaError};

/// Default (hidden) store directory name
pub const DEFAULT_STORE_DIR: &str = ".rubrica";
/// Visible store directory name
pub const VISIBLE_STORE_DIR: &str = "rubrica";
/// Store configuration file
pub const CONFIG_FILE: &str = "config.toml";

/// Fixed key for the rubric dictionary
pub const RUBRICS_KEY: &str = "rubricas";
/// Fixed key for the evaluation dictionary
pub const EVALUATIONS_KEY: &str = "evaluaciones";
/// Fixed key for the course-state dictionary
pub const COURSES_KEY: &str = "cursos";

/// Discover a store by walking up from `root` looking for a store directory
pub fn discover_store(root: &Path) -> Result<PathBuf> {
    let mut current = Some(root);
    while let Some(dir) = current {
        for name in [DEFAULT_STORE_DIR, VISIBLE_STORE_DIR] {
            let candidate = dir.join(name);
            if candidate.join(CONFIG_FILE).is_file() {
                return Ok(candidate);
            }
        }
        current = dir.parent();
    }
    Err(RubricaError::StoreNotFound {
        search_root: root.to_path_buf(),
    })
}
