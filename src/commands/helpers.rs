//! Shared command plumbing: store resolution, the save pipeline and
//! id-or-code lookup.

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use rubrica_core::code;
use rubrica_core::compare::Comparison;
use rubrica_core::error::{Result, RubricaError};
use rubrica_core::model::{CourseState, Rubric};
use rubrica_core::store::{RubricRepository, RubricSet, Store};
use rubrica_core::text::course_initials;
use rubrica_core::versioning::{analyze, Verdict};

use crate::cli::{Cli, OnDuplicate};

/// Resolve the working root from CLI flags
pub fn resolve_root(cli: &Cli) -> PathBuf {
    cli.root
        .clone()
        .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Open the store from --store, or discover it from the root
pub fn open_store(cli: &Cli) -> Result<Store> {
    match &cli.store {
        Some(path) => Store::open(path),
        None => Store::discover(&resolve_root(cli)),
    }
}

/// Resolve a rubric id from an id or an assigned code
pub fn resolve_id(set: &RubricSet, id_or_code: &str) -> Result<String> {
    set.resolve(id_or_code)
        .map(|r| r.id.clone())
        .ok_or_else(|| RubricaError::RubricNotFound {
            id: id_or_code.to_string(),
        })
}

/// Initials used for a candidate's code, preferring the registered course
/// display name over the raw course code. A source that already looks like
/// a course code (short, uppercase) is taken verbatim instead of being
/// collapsed to its first letter.
pub fn initials_for(courses: &BTreeMap<String, CourseState>, candidate: &Rubric) -> String {
    let source = candidate
        .courses
        .iter()
        .next()
        .map(|code| {
            courses
                .get(code)
                .map(|c| c.initials_source().to_string())
                .unwrap_or_else(|| code.clone())
        })
        .unwrap_or_else(|| candidate.name.clone());

    if looks_like_initials(&source) {
        source
    } else {
        course_initials(&source)
    }
}

fn looks_like_initials(source: &str) -> bool {
    !source.is_empty()
        && source.len() <= 8
        && source
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// How a save attempt was resolved
#[derive(Debug)]
pub enum SaveReport {
    Created { id: String, code: String },
    NewVersion { id: String, code: String, comparison: Comparison },
    Overwritten { id: String, code: Option<String> },
    SkippedIdentical { matched_id: String, matched_code: Option<String> },
    SkippedVersion { matched_id: String, comparison: Comparison, next_version: u32 },
    SkippedContent { matched_id: String, matched_code: Option<String> },
}

impl SaveReport {
    /// Short machine-readable label, mirroring the detector's outcomes
    pub fn label(&self) -> &'static str {
        match self {
            SaveReport::Created { .. } => "nuevo",
            SaveReport::NewVersion { .. } => "nueva_version",
            SaveReport::Overwritten { .. } => "sobrescrita",
            SaveReport::SkippedIdentical { .. } => "duplicada_identica",
            SaveReport::SkippedVersion { .. } => "nueva_version",
            SaveReport::SkippedContent { .. } => "duplicada_contenido",
        }
    }
}

/// Classify `candidate` against the set and save it according to `policy`.
/// The store is only mutated for the `Created`, `NewVersion` and
/// `Overwritten` outcomes.
pub fn save_with_policy(
    set: &mut RubricSet,
    mut candidate: Rubric,
    initials: &str,
    policy: OnDuplicate,
) -> Result<SaveReport> {
    let verdict = analyze(&candidate, &set.list(), None);

    match verdict {
        Verdict::New => {
            let generated = code::generate(
                candidate.rubric_type,
                candidate.delivery,
                initials,
                set.codes(),
            );
            candidate.code = Some(generated.code.clone());
            candidate.version = Some(generated.version);
            let id = candidate.id.clone();
            set.put(candidate);
            Ok(SaveReport::Created {
                id,
                code: generated.code,
            })
        }

        Verdict::IdenticalDuplicate { matched, .. } => match policy {
            OnDuplicate::Skip | OnDuplicate::NewVersion => Ok(SaveReport::SkippedIdentical {
                matched_id: matched.id,
                matched_code: matched.code,
            }),
            OnDuplicate::Overwrite => Ok(overwrite(set, &matched, candidate)),
        },

        Verdict::NewVersion {
            matched,
            comparison,
            next_version,
        } => match policy {
            OnDuplicate::Skip => Ok(SaveReport::SkippedVersion {
                matched_id: matched.id,
                comparison,
                next_version,
            }),
            OnDuplicate::Overwrite => Ok(overwrite(set, &matched, candidate)),
            OnDuplicate::NewVersion => {
                let code = match matched.code.as_deref() {
                    Some(matched_code) => {
                        format!("{}V{}", code::base_of(matched_code), next_version)
                    }
                    None => {
                        code::generate(
                            candidate.rubric_type,
                            candidate.delivery,
                            initials,
                            set.codes(),
                        )
                        .code
                    }
                };
                candidate.code = Some(code.clone());
                candidate.version = Some(next_version);
                let id = candidate.id.clone();
                set.put(candidate);
                Ok(SaveReport::NewVersion {
                    id,
                    code,
                    comparison,
                })
            }
        },

        Verdict::ContentDuplicate { matched } => match policy {
            OnDuplicate::Overwrite => Ok(overwrite(set, &matched, candidate)),
            _ => Ok(SaveReport::SkippedContent {
                matched_id: matched.id,
                matched_code: matched.code,
            }),
        },
    }
}

/// Replace the matched rubric's content in place, keeping its identity,
/// code, version and lifecycle flags.
fn overwrite(set: &mut RubricSet, matched: &Rubric, candidate: Rubric) -> SaveReport {
    let mut updated = matched.clone();
    updated.name = candidate.name;
    updated.courses = candidate.courses;
    updated.criteria = candidate.criteria;
    updated.total_points = candidate.total_points;
    updated.grading_scale = candidate.grading_scale;
    updated.modified = Some(chrono::Utc::now());
    let report = SaveReport::Overwritten {
        id: updated.id.clone(),
        code: updated.code.clone(),
    };
    set.put(updated);
    report
}
