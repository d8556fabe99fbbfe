//! Structural comparison of two rubric definitions
//!
//! Criteria are matched by normalized title, not position. Identity fields
//! (id, code, version, timestamps, courses) never count toward the verdict;
//! only pedagogical content does.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{Criterion, Rubric};
use crate::text::normalize_name;

/// Outcome of comparing two rubrics
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    #[serde(rename = "identicas")]
    pub identical: bool,
    #[serde(rename = "diferencias")]
    pub differences: Vec<String>,
}

/// Structurally diff rubric `a` (original) against `b` (candidate),
/// producing one human-readable string per difference.
pub fn compare(a: &Rubric, b: &Rubric) -> Comparison {
    let mut differences = Vec::new();

    if a.total_points != b.total_points {
        differences.push(format!(
            "puntuación total cambió de {} a {}",
            a.total_points, b.total_points
        ));
    }

    let b_by_title: BTreeMap<String, &Criterion> = b
        .criteria
        .iter()
        .map(|c| (normalize_name(&c.title), c))
        .collect();
    let a_titles: BTreeMap<String, &Criterion> = a
        .criteria
        .iter()
        .map(|c| (normalize_name(&c.title), c))
        .collect();

    for criterion in &a.criteria {
        match b_by_title.get(&normalize_name(&criterion.title)) {
            None => differences.push(format!("criterio eliminado: \"{}\"", criterion.title)),
            Some(other) => diff_criterion(criterion, other, &mut differences),
        }
    }

    for criterion in &b.criteria {
        if !a_titles.contains_key(&normalize_name(&criterion.title)) {
            differences.push(format!("criterio agregado: \"{}\"", criterion.title));
        }
    }

    if a.grading_scale != b.grading_scale {
        differences.push("escala de calificación cambió".to_string());
    }

    Comparison {
        identical: differences.is_empty(),
        differences,
    }
}

fn diff_criterion(a: &Criterion, b: &Criterion, differences: &mut Vec<String>) {
    if a.weight != b.weight {
        differences.push(format!(
            "peso del criterio \"{}\" cambió de {} a {}",
            a.title, a.weight, b.weight
        ));
    }
    if levels_differ(a, b) {
        differences.push(format!("niveles del criterio \"{}\" cambiaron", a.title));
    }
}

/// Level lists differ on count, point ranges, titles or descriptions
fn levels_differ(a: &Criterion, b: &Criterion) -> bool {
    if a.levels.len() != b.levels.len() {
        return true;
    }
    a.levels.iter().zip(&b.levels).any(|(la, lb)| {
        la.min_points != lb.min_points
            || la.max_points != lb.max_points
            || la.title != lb.title
            || la.description != lb.description
    })
}
