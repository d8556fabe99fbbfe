//! Version activation
//!
//! Within a version family (all rubrics whose codes share a base code) at
//! most one rubric is active. This pass is the only place that invariant is
//! enforced; it relies on codes having been assigned by the code generator.

use chrono::Utc;

use crate::code;
use crate::error::{Result, RubricaError};
use crate::store::RubricRepository;

/// Activate `rubric_id` and deactivate every sibling version sharing its
/// base code. Stamps the modification time on every rubric touched and
/// returns how many were.
pub fn activate(repo: &mut dyn RubricRepository, rubric_id: &str) -> Result<usize> {
    let target = repo.get(rubric_id).ok_or_else(|| RubricaError::RubricNotFound {
        id: rubric_id.to_string(),
    })?;

    let Some(target_code) = target.code.clone() else {
        tracing::warn!(id = rubric_id, "activation skipped: rubric has no code");
        return Err(RubricaError::MissingCode {
            id: rubric_id.to_string(),
        });
    };

    let base = code::base_of(&target_code).to_string();
    let family: Vec<_> = repo
        .list()
        .into_iter()
        .filter(|r| {
            r.code
                .as_deref()
                .is_some_and(|c| code::in_family(c, &base))
        })
        .cloned()
        .collect();

    let now = Utc::now();
    let touched = family.len();
    for mut rubric in family {
        rubric.active = rubric.id == rubric_id;
        rubric.modified = Some(now);
        repo.put(rubric);
    }

    tracing::debug!(id = rubric_id, base = %base, touched, "version activated");
    Ok(touched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Delivery, Rubric, RubricType};
    use crate::store::RubricSet;

    fn rubric(code: Option<&str>, active: bool) -> Rubric {
        let mut r = Rubric::new("Rúbrica", RubricType::Group, Delivery::First, "EPM");
        r.code = code.map(String::from);
        r.version = code.and_then(crate::code::version_of);
        r.active = active;
        r
    }

    fn active_ids(set: &RubricSet) -> Vec<String> {
        set.list()
            .into_iter()
            .filter(|r| r.active)
            .map(|r| r.id.clone())
            .collect()
    }

    #[test]
    fn test_activate_deactivates_siblings() {
        let mut set = RubricSet::default();
        let v1 = rubric(Some("RGE1-EPMV1"), true);
        let v2 = rubric(Some("RGE1-EPMV2"), false);
        let other = rubric(Some("RIE1-EPMV1"), true);
        let (v1_id, v2_id, other_id) = (v1.id.clone(), v2.id.clone(), other.id.clone());
        set.put(v1);
        set.put(v2);
        set.put(other);

        let touched = activate(&mut set, &v2_id).unwrap();
        assert_eq!(touched, 2);

        assert!(!set.get(&v1_id).unwrap().active);
        assert!(set.get(&v2_id).unwrap().active);
        // different family untouched
        assert!(set.get(&other_id).unwrap().active);
        assert!(set.get(&other_id).unwrap().modified.is_none());
        assert!(set.get(&v1_id).unwrap().modified.is_some());
    }

    #[test]
    fn test_exactly_one_active_after_activation() {
        let mut set = RubricSet::default();
        let mut ids = Vec::new();
        for code in ["RGE1-EPMV1", "RGE1-EPMV2", "RGE1-EPMV3"] {
            let r = rubric(Some(code), true);
            ids.push(r.id.clone());
            set.put(r);
        }

        activate(&mut set, &ids[1]).unwrap();
        assert_eq!(active_ids(&set), vec![ids[1].clone()]);
    }

    #[test]
    fn test_activate_idempotent() {
        let mut set = RubricSet::default();
        let v1 = rubric(Some("RGE1-EPMV1"), false);
        let v2 = rubric(Some("RGE1-EPMV2"), false);
        let v2_id = v2.id.clone();
        set.put(v1);
        set.put(v2);

        let first = activate(&mut set, &v2_id).unwrap();
        let after_first = active_ids(&set);
        let second = activate(&mut set, &v2_id).unwrap();
        let after_second = active_ids(&set);

        assert_eq!(first, second);
        assert_eq!(after_first, after_second);
        assert_eq!(after_second, vec![v2_id]);
    }

    #[test]
    fn test_activate_handles_legacy_suffix() {
        let mut set = RubricSet::default();
        let legacy = rubric(Some("RGE1-EPM-1"), true);
        let v2 = rubric(Some("RGE1-EPMV2"), false);
        let (legacy_id, v2_id) = (legacy.id.clone(), v2.id.clone());
        set.put(legacy);
        set.put(v2);

        let touched = activate(&mut set, &v2_id).unwrap();
        assert_eq!(touched, 2);
        assert!(!set.get(&legacy_id).unwrap().active);
        assert!(set.get(&v2_id).unwrap().active);
    }

    #[test]
    fn test_activate_without_code_fails_without_writes() {
        let mut set = RubricSet::default();
        let draft = rubric(None, false);
        let sibling = rubric(Some("RGE1-EPMV1"), true);
        let (draft_id, sibling_id) = (draft.id.clone(), sibling.id.clone());
        set.put(draft);
        set.put(sibling);

        let err = activate(&mut set, &draft_id).unwrap_err();
        assert!(matches!(err, RubricaError::MissingCode { .. }));
        // nothing was touched
        assert!(set.get(&sibling_id).unwrap().active);
        assert!(set.get(&sibling_id).unwrap().modified.is_none());
    }

    #[test]
    fn test_activate_unknown_rubric() {
        let mut set = RubricSet::default();
        let err = activate(&mut set, "rb-missing").unwrap_err();
        assert!(matches!(err, RubricaError::RubricNotFound { .. }));
    }
}
