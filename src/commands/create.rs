//! `rubrica create` - create a new draft rubric
//!
//! Saving runs the duplicate detector; a name match with different content
//! becomes the next version of that family automatically.

use tracing::debug;

use rubrica_core::error::{Result, RubricaError};
use rubrica_core::model::Rubric;

use crate::cli::{Cli, CreateArgs, OnDuplicate, OutputFormat};
use crate::commands::helpers::{initials_for, open_store, save_with_policy, SaveReport};

pub fn execute(cli: &Cli, args: &CreateArgs) -> Result<()> {
    let store = open_store(cli)?;
    let mut set = store.load_rubrics()?;
    let courses = store.load_courses()?;

    let rubric_type = args
        .r#type
        .unwrap_or(store.config().default_rubric_type);
    let mut rubric = Rubric::new(&args.name, rubric_type, args.delivery, &args.course);
    rubric.total_points = args.total;

    let initials = initials_for(&courses, &rubric);
    debug!(name = %args.name, %initials, "create_rubric");

    let report = save_with_policy(&mut set, rubric, &initials, OnDuplicate::NewVersion)?;
    let (id, code) = match &report {
        SaveReport::Created { id, code } | SaveReport::NewVersion { id, code, .. } => {
            (id.clone(), code.clone())
        }
        SaveReport::SkippedIdentical { matched_id, matched_code }
        | SaveReport::SkippedContent { matched_id, matched_code } => {
            return Err(RubricaError::validation(format!(
                "una rúbrica equivalente ya existe: {} ({})",
                matched_id,
                matched_code.as_deref().unwrap_or("sin código")
            )));
        }
        _ => unreachable!("create never skips or overwrites versions"),
    };
    store.save_rubrics(&set)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": id,
                "codigo": code,
                "resultado": report.label(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{}", id);
            if !cli.quiet {
                eprintln!("código: {}", code);
            }
        }
    }

    Ok(())
}
