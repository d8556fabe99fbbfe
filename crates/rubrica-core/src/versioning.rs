//! Duplicate and version detection for candidate rubrics
//!
//! A candidate is classified against the existing rubrics before saving:
//! same name with identical content, same name with changes (a new version),
//! identical content under a different name, or genuinely new.

use crate::code;
use crate::compare::{compare, Comparison};
use crate::model::Rubric;
use crate::text::normalize_name;

/// Classification of a candidate rubric against the existing set
#[derive(Debug, Clone)]
pub enum Verdict {
    /// No name or content match
    New,
    /// Name matches an existing rubric and the content is identical
    IdenticalDuplicate {
        matched: Rubric,
        comparison: Comparison,
    },
    /// Name matches an existing rubric but the content differs
    NewVersion {
        matched: Rubric,
        comparison: Comparison,
        next_version: u32,
    },
    /// Different name, but some existing rubric has identical content
    ContentDuplicate { matched: Rubric },
}

impl Verdict {
    /// Short machine-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::New => "nuevo",
            Verdict::IdenticalDuplicate { .. } => "duplicada_identica",
            Verdict::NewVersion { .. } => "nueva_version",
            Verdict::ContentDuplicate { .. } => "duplicada_contenido",
        }
    }
}

/// Classify `candidate` against `existing`, skipping `exclude_id` (used when
/// re-analyzing an edited rubric against its own stored copy).
pub fn analyze(candidate: &Rubric, existing: &[&Rubric], exclude_id: Option<&str>) -> Verdict {
    let candidate_name = normalize_name(&candidate.name);
    let others: Vec<&Rubric> = existing
        .iter()
        .copied()
        .filter(|r| Some(r.id.as_str()) != exclude_id)
        .collect();

    if let Some(matched) = others
        .iter()
        .find(|r| normalize_name(&r.name) == candidate_name)
    {
        let comparison = compare(matched, candidate);
        if comparison.identical {
            return Verdict::IdenticalDuplicate {
                matched: (*matched).clone(),
                comparison,
            };
        }
        let next_version = next_version_for(matched, &others);
        return Verdict::NewVersion {
            matched: (*matched).clone(),
            comparison,
            next_version,
        };
    }

    let fingerprint = candidate.content_fingerprint();
    if let Some(matched) = others
        .iter()
        .find(|r| r.content_fingerprint() == fingerprint)
    {
        return Verdict::ContentDuplicate {
            matched: (*matched).clone(),
        };
    }

    Verdict::New
}

/// Next version for the matched rubric's code family; when the match was
/// never assigned a code, fall back to its stored version counter.
fn next_version_for(matched: &Rubric, existing: &[&Rubric]) -> u32 {
    match matched.code.as_deref() {
        Some(matched_code) => {
            let base = code::base_of(matched_code);
            code::next_version(base, existing.iter().filter_map(|r| r.code.as_deref()))
        }
        None => matched.version.unwrap_or(1) + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Criterion, Delivery, Level, RubricType};

    fn rubric(name: &str, code: Option<&str>, version: Option<u32>) -> Rubric {
        let mut r = Rubric::new(name, RubricType::Group, Delivery::First, "EPM");
        r.code = code.map(String::from);
        r.version = version;
        r.criteria = vec![Criterion {
            title: "Diseño".to_string(),
            weight: 100.0,
            levels: vec![Level {
                min_points: 0.0,
                max_points: 100.0,
                title: "Logrado".to_string(),
                description: String::new(),
            }],
        }];
        r
    }

    #[test]
    fn test_new_when_store_empty() {
        let candidate = rubric("Rúbrica E1", None, None);
        assert!(matches!(analyze(&candidate, &[], None), Verdict::New));
    }

    #[test]
    fn test_identical_duplicate_by_name() {
        let existing = rubric("Rúbrica E1", Some("RGE1-EPMV1"), Some(1));
        let candidate = rubric("rubrica  e1", None, None);
        let verdict = analyze(&candidate, &[&existing], None);
        match verdict {
            Verdict::IdenticalDuplicate { matched, comparison } => {
                assert_eq!(matched.id, existing.id);
                assert!(comparison.identical);
            }
            other => panic!("expected identical duplicate, got {}", other.label()),
        }
    }

    #[test]
    fn test_new_version_with_weight_change() {
        // Worked example: one criterion weight changed 20 -> 25 against V1
        let mut existing = rubric(
            "Rúbrica Grupal E1 - Programación Móvil",
            Some("RGE1-EPMV1"),
            Some(1),
        );
        existing.criteria = vec![
            Criterion {
                title: "Diseño".to_string(),
                weight: 20.0,
                levels: vec![],
            },
            Criterion {
                title: "Pruebas".to_string(),
                weight: 80.0,
                levels: vec![],
            },
        ];
        let mut candidate = existing.clone();
        candidate.id = "rb-candidate".to_string();
        candidate.code = None;
        candidate.version = None;
        candidate.criteria[0].weight = 25.0;

        let verdict = analyze(&candidate, &[&existing], None);
        match verdict {
            Verdict::NewVersion {
                matched,
                comparison,
                next_version,
            } => {
                assert_eq!(matched.id, existing.id);
                assert_eq!(next_version, 2);
                assert_eq!(comparison.differences.len(), 1);
                assert!(comparison.differences[0].contains("peso"));
                assert!(comparison.differences[0].contains("Diseño"));
            }
            other => panic!("expected new version, got {}", other.label()),
        }
    }

    #[test]
    fn test_next_version_scans_whole_family() {
        let v1 = rubric("Rúbrica E1", Some("RGE1-EPMV1"), Some(1));
        let v3 = rubric("Otra cosa", Some("RGE1-EPMV3"), Some(3));
        let mut candidate = rubric("Rúbrica E1", None, None);
        candidate.criteria[0].weight = 90.0;
        candidate.total_points = 90.0;

        match analyze(&candidate, &[&v1, &v3], None) {
            Verdict::NewVersion { next_version, .. } => assert_eq!(next_version, 4),
            other => panic!("expected new version, got {}", other.label()),
        }
    }

    #[test]
    fn test_content_duplicate_under_other_name() {
        let existing = rubric("Rúbrica E1", Some("RGE1-EPMV1"), Some(1));
        let mut candidate = rubric("Nombre distinto", None, None);
        candidate.criteria = existing.criteria.clone();
        let verdict = analyze(&candidate, &[&existing], None);
        match verdict {
            Verdict::ContentDuplicate { matched } => assert_eq!(matched.id, existing.id),
            other => panic!("expected content duplicate, got {}", other.label()),
        }
    }

    #[test]
    fn test_exclude_id_skips_own_copy() {
        let existing = rubric("Rúbrica E1", Some("RGE1-EPMV1"), Some(1));
        let verdict = analyze(&existing, &[&existing], Some(existing.id.as_str()));
        assert!(matches!(verdict, Verdict::New));
    }

    #[test]
    fn test_unsaved_match_falls_back_to_version_counter() {
        let existing = rubric("Rúbrica E1", None, None);
        let mut candidate = rubric("Rúbrica E1", None, None);
        candidate.criteria[0].weight = 50.0;
        candidate.total_points = 50.0;
        match analyze(&candidate, &[&existing], None) {
            Verdict::NewVersion { next_version, .. } => assert_eq!(next_version, 2),
            other => panic!("expected new version, got {}", other.label()),
        }
    }
}
