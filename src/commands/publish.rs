//! `rubrica publish` - draft to published, one-way
//!
//! Publishing validates that criterion weights add up to the declared total
//! and assigns a code to rubrics that never got one (new-version drafts).

use rubrica_core::code;
use rubrica_core::error::Result;
use rubrica_core::model::RubricStatus;
use rubrica_core::store::RubricRepository;
use rubrica_core::versioning::{analyze, Verdict};

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::{initials_for, open_store, resolve_id};

pub fn execute(cli: &Cli, id_or_code: &str) -> Result<()> {
    let store = open_store(cli)?;
    let mut set = store.load_rubrics()?;
    let id = resolve_id(&set, id_or_code)?;

    let mut rubric = set.get(&id).expect("resolved id").clone();
    rubric.validate_for_publish()?;

    let already_published = rubric.status == RubricStatus::Published;
    if !already_published {
        if rubric.code.is_none() {
            assign_code(&set, &mut rubric, &store.load_courses()?);
        }
        rubric.status = RubricStatus::Published;
        rubric.modified = Some(chrono::Utc::now());
        set.put(rubric.clone());
        store.save_rubrics(&set)?;
    }

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": rubric.id,
                "codigo": rubric.code,
                "estado": rubric.status.to_string(),
                "ya_publicada": already_published,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if already_published {
                println!("ya publicada: {}", rubric.id);
            } else {
                println!(
                    "publicada: {} ({})",
                    rubric.id,
                    rubric.code.as_deref().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}

/// Code assignment for drafts created with `new-version`: slot into the
/// name-matched family when there is one, otherwise start a fresh family.
fn assign_code(
    set: &rubrica_core::store::RubricSet,
    rubric: &mut rubrica_core::model::Rubric,
    courses: &std::collections::BTreeMap<String, rubrica_core::model::CourseState>,
) {
    let verdict = analyze(rubric, &set.list(), Some(rubric.id.as_str()));
    let family_base = match verdict {
        Verdict::NewVersion { matched, .. } | Verdict::IdenticalDuplicate { matched, .. } => {
            matched.code.as_deref().map(|c| code::base_of(c).to_string())
        }
        _ => None,
    };

    let (generated_code, version) = match family_base {
        Some(base) => {
            let next = code::next_version(&base, set.codes());
            (format!("{}V{}", base, next), next)
        }
        None => {
            let initials = initials_for(courses, rubric);
            let generated = code::generate(
                rubric.rubric_type,
                rubric.delivery,
                &initials,
                set.codes(),
            );
            (generated.code, generated.version)
        }
    };
    rubric.code = Some(generated_code);
    rubric.version = Some(version);
}
