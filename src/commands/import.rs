//! `rubrica import` - import a rubric from a file
//!
//! The candidate is classified against the store before anything is written;
//! duplicate and version conflicts are outcomes resolved by --on-duplicate,
//! not errors.

use std::collections::BTreeSet;
use std::fs;

use tracing::debug;

use rubrica_core::error::Result;
use rubrica_core::format;

use crate::cli::{Cli, ImportArgs, OutputFormat};
use crate::commands::helpers::{initials_for, open_store, save_with_policy, SaveReport};

pub fn execute(cli: &Cli, args: &ImportArgs) -> Result<()> {
    let store = open_store(cli)?;
    let content = fs::read_to_string(&args.file)?;
    let file_name = args.file.file_name().and_then(|n| n.to_str()).unwrap_or("");

    let detected = format::detect(file_name, &content);
    debug!(file = %args.file.display(), %detected, "import_file");

    let mut candidate = format::parse(&content, detected)?;
    if let Some(course) = &args.course {
        candidate.courses = BTreeSet::from([course.clone()]);
    }

    let mut set = store.load_rubrics()?;
    let courses = store.load_courses()?;
    let initials = initials_for(&courses, &candidate);

    let report = save_with_policy(&mut set, candidate, &initials, args.on_duplicate)?;
    if matches!(
        report,
        SaveReport::Created { .. } | SaveReport::NewVersion { .. } | SaveReport::Overwritten { .. }
    ) {
        store.save_rubrics(&set)?;
    }

    print_report(cli, &report)?;
    Ok(())
}

fn print_report(cli: &Cli, report: &SaveReport) -> Result<()> {
    if cli.format == OutputFormat::Json {
        let mut output = serde_json::json!({ "resultado": report.label() });
        let obj = output.as_object_mut().expect("json object");
        match report {
            SaveReport::Created { id, code } | SaveReport::NewVersion { id, code, .. } => {
                obj.insert("id".into(), serde_json::json!(id));
                obj.insert("codigo".into(), serde_json::json!(code));
            }
            SaveReport::Overwritten { id, code } => {
                obj.insert("id".into(), serde_json::json!(id));
                obj.insert("codigo".into(), serde_json::json!(code));
                obj.insert("sobrescrita".into(), serde_json::json!(true));
            }
            SaveReport::SkippedIdentical { matched_id, matched_code }
            | SaveReport::SkippedContent { matched_id, matched_code } => {
                obj.insert("coincide_con".into(), serde_json::json!(matched_id));
                obj.insert("codigo".into(), serde_json::json!(matched_code));
            }
            SaveReport::SkippedVersion {
                matched_id,
                comparison,
                next_version,
            } => {
                obj.insert("coincide_con".into(), serde_json::json!(matched_id));
                obj.insert("proxima_version".into(), serde_json::json!(next_version));
                obj.insert(
                    "diferencias".into(),
                    serde_json::json!(comparison.differences),
                );
            }
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match report {
        SaveReport::Created { id, code } => println!("importada: {} ({})", id, code),
        SaveReport::NewVersion { id, code, .. } => {
            println!("importada como nueva versión: {} ({})", id, code)
        }
        SaveReport::Overwritten { id, .. } => println!("sobrescrita: {}", id),
        SaveReport::SkippedIdentical { matched_id, .. } => {
            println!("omitida: idéntica a {}", matched_id)
        }
        SaveReport::SkippedContent { matched_id, .. } => {
            println!("omitida: mismo contenido que {}", matched_id)
        }
        SaveReport::SkippedVersion {
            matched_id,
            comparison,
            next_version,
        } => {
            println!(
                "omitida: sería la versión {} de {} (use --on-duplicate new-version)",
                next_version, matched_id
            );
            for difference in &comparison.differences {
                println!("  - {}", difference);
            }
        }
    }
    Ok(())
}
