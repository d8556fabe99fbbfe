//! Store management for rubrica
//!
//! The store is the root directory containing all rubrica data:
//! `config.toml` plus one JSON document per fixed key (`rubricas`,
//! `evaluaciones`, `cursos`). Default location: `.rubrica/` (hidden,
//! git-trackable).

pub mod kv;
pub mod paths;
pub mod rubrics;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{InitOptions, StoreConfig};
use crate::error::{Result, RubricaError};
use crate::model::{CourseState, Evaluation};
use kv::KvStore;
use paths::{
    CONFIG_FILE, COURSES_KEY, DEFAULT_STORE_DIR, EVALUATIONS_KEY, RUBRICS_KEY, VISIBLE_STORE_DIR,
};
pub use rubrics::{RubricRepository, RubricSet};

/// The rubrica store
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
    config: StoreConfig,
    kv: KvStore,
}

impl Store {
    /// Discover a store by walking up from the given root directory
    pub fn discover(root: &Path) -> Result<Self> {
        let store_path = paths::discover_store(root)?;
        Self::open(&store_path)
    }

    /// Open an existing store at the given path
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(RubricaError::StoreNotFound {
                search_root: path.to_path_buf(),
            });
        }

        let config_path = path.join(CONFIG_FILE);
        let config = if config_path.exists() {
            StoreConfig::load(&config_path)?
        } else {
            StoreConfig::default()
        };

        Ok(Store {
            root: path.to_path_buf(),
            config,
            kv: KvStore::new(path),
        })
    }

    /// Initialize a new store under the given project root
    pub fn init(project_root: &Path, options: InitOptions) -> Result<Self> {
        let store_name = if options.visible {
            VISIBLE_STORE_DIR
        } else {
            DEFAULT_STORE_DIR
        };
        Self::init_at(&project_root.join(store_name))
    }

    /// Initialize a store at an explicit store root path
    pub fn init_at(store_path: &Path) -> Result<Self> {
        if store_path.join(CONFIG_FILE).exists() {
            return Err(RubricaError::InvalidStore {
                reason: format!("store already exists at {}", store_path.display()),
            });
        }

        fs::create_dir_all(store_path)?;
        let config = StoreConfig::default();
        config.save(&store_path.join(CONFIG_FILE))?;

        tracing::info!(path = %store_path.display(), "store initialized");
        Self::open(store_path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Load the rubric dictionary (fixed key `rubricas`)
    pub fn load_rubrics(&self) -> Result<RubricSet> {
        let dict = self.kv.get(RUBRICS_KEY)?.unwrap_or_default();
        Ok(RubricSet::new(dict))
    }

    /// Persist the rubric dictionary whole
    pub fn save_rubrics(&self, set: &RubricSet) -> Result<()> {
        self.kv.set(RUBRICS_KEY, set.inner())
    }

    /// Load the evaluation dictionary (fixed key `evaluaciones`)
    pub fn load_evaluations(&self) -> Result<BTreeMap<String, Evaluation>> {
        Ok(self.kv.get(EVALUATIONS_KEY)?.unwrap_or_default())
    }

    pub fn save_evaluations(&self, evaluations: &BTreeMap<String, Evaluation>) -> Result<()> {
        self.kv.set(EVALUATIONS_KEY, evaluations)
    }

    /// Load the course-state dictionary (fixed key `cursos`)
    pub fn load_courses(&self) -> Result<BTreeMap<String, CourseState>> {
        Ok(self.kv.get(COURSES_KEY)?.unwrap_or_default())
    }

    pub fn save_courses(&self, courses: &BTreeMap<String, CourseState>) -> Result<()> {
        self.kv.set(COURSES_KEY, courses)
    }

    /// Delete a course and cascade its evaluations. Returns the number of
    /// evaluations removed, or an error when the course is unknown.
    pub fn delete_course(&self, code: &str) -> Result<usize> {
        let mut courses = self.load_courses()?;
        if courses.remove(code).is_none() {
            return Err(RubricaError::CourseNotFound {
                code: code.to_string(),
            });
        }

        let mut evaluations = self.load_evaluations()?;
        let before = evaluations.len();
        evaluations.retain(|_, eval| eval.course != code);
        let removed = before - evaluations.len();

        self.save_courses(&courses)?;
        self.save_evaluations(&evaluations)?;
        tracing::debug!(course = code, evaluations = removed, "course deleted");
        Ok(removed)
    }
}
