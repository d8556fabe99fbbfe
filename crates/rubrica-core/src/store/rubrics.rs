//! Rubric repository: the in-memory rubric dictionary and its access trait

use std::collections::BTreeMap;

use crate::model::Rubric;

/// Repository interface over rubric definitions. The activator and other
/// domain operations receive this instead of touching storage directly.
pub trait RubricRepository {
    fn get(&self, id: &str) -> Option<&Rubric>;
    fn put(&mut self, rubric: Rubric);
    fn delete(&mut self, id: &str) -> Option<Rubric>;
    fn list(&self) -> Vec<&Rubric>;
}

/// The rubric dictionary as persisted: keyed by rubric id, loaded and saved
/// whole (last write wins).
#[derive(Debug, Default, Clone)]
pub struct RubricSet {
    rubrics: BTreeMap<String, Rubric>,
}

impl RubricSet {
    pub fn new(rubrics: BTreeMap<String, Rubric>) -> Self {
        RubricSet { rubrics }
    }

    pub fn into_inner(self) -> BTreeMap<String, Rubric> {
        self.rubrics
    }

    pub fn inner(&self) -> &BTreeMap<String, Rubric> {
        &self.rubrics
    }

    pub fn len(&self) -> usize {
        self.rubrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rubrics.is_empty()
    }

    /// All assigned codes in the set
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rubrics.values().filter_map(|r| r.code.as_deref())
    }

    /// Resolve a rubric by id or by assigned code
    pub fn resolve(&self, id_or_code: &str) -> Option<&Rubric> {
        self.rubrics.get(id_or_code).or_else(|| {
            self.rubrics
                .values()
                .find(|r| r.code.as_deref() == Some(id_or_code))
        })
    }
}

impl RubricRepository for RubricSet {
    fn get(&self, id: &str) -> Option<&Rubric> {
        self.rubrics.get(id)
    }

    fn put(&mut self, rubric: Rubric) {
        self.rubrics.insert(rubric.id.clone(), rubric);
    }

    fn delete(&mut self, id: &str) -> Option<Rubric> {
        self.rubrics.remove(id)
    }

    fn list(&self) -> Vec<&Rubric> {
        self.rubrics.values().collect()
    }
}
