//! `rubrica eval` - evaluation records keyed by course, delivery, type and
//! student or group

use std::collections::BTreeMap;

use rubrica_core::error::{Result, RubricaError};
use rubrica_core::model::{Delivery, Evaluation, Rubric, RubricType};
use rubrica_core::text::normalize_name;

use crate::cli::parse::parse_points;
use crate::cli::{Cli, EvalCommands, OutputFormat};
use crate::commands::helpers::open_store;

pub fn execute(cli: &Cli, command: &EvalCommands) -> Result<()> {
    match command {
        EvalCommands::Save {
            course,
            delivery,
            subject,
            rubric,
            r#type,
            points,
        } => save(cli, course, *delivery, subject, rubric.as_deref(), *r#type, points),
        EvalCommands::Show {
            course,
            delivery,
            subject,
            r#type,
        } => show(cli, course, *delivery, subject, *r#type),
        EvalCommands::Delete {
            course,
            delivery,
            subject,
            r#type,
        } => delete(cli, course, *delivery, subject, *r#type),
    }
}

#[allow(clippy::too_many_arguments)]
fn save(
    cli: &Cli,
    course: &str,
    delivery: Delivery,
    subject: &str,
    rubric_ref: Option<&str>,
    rubric_type: Option<RubricType>,
    points_spec: &str,
) -> Result<()> {
    let store = open_store(cli)?;
    let set = store.load_rubrics()?;
    let rubric_type = rubric_type.unwrap_or(store.config().default_rubric_type);

    let rubric = match rubric_ref {
        Some(reference) => set
            .resolve(reference)
            .ok_or_else(|| RubricaError::RubricNotFound {
                id: reference.to_string(),
            })?,
        None => {
            let courses = store.load_courses()?;
            let slot = courses
                .get(course)
                .and_then(|c| c.rubric_for(delivery, rubric_type))
                .ok_or_else(|| {
                    RubricaError::validation(format!(
                        "el curso {} no tiene rúbrica asociada para {} {}",
                        course, delivery, rubric_type
                    ))
                })?;
            set.resolve(slot).ok_or_else(|| RubricaError::RubricNotFound {
                id: slot.to_string(),
            })?
        }
    };

    let pairs = parse_points(points_spec).map_err(RubricaError::UsageError)?;
    let points = resolve_points(rubric, &pairs)?;

    let eval = Evaluation::new(course, delivery, rubric_type, subject, &rubric.id, points);
    let grade = rubric.grade_label(eval.total).map(str::to_string);

    let mut evaluations = store.load_evaluations()?;
    evaluations.insert(eval.key(), eval.clone());
    store.save_evaluations(&evaluations)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "clave": eval.key(),
                "total": eval.total,
                "calificacion": grade,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!(
                "{}: {} puntos{}",
                eval.key(),
                eval.total,
                grade.map(|g| format!(" ({})", g)).unwrap_or_default()
            );
        }
    }
    Ok(())
}

/// Map `--points` keys (1-based index or title) to criterion titles
fn resolve_points(rubric: &Rubric, pairs: &[(String, f64)]) -> Result<BTreeMap<String, f64>> {
    let mut points = BTreeMap::new();
    for (key, value) in pairs {
        let criterion = match key.parse::<usize>() {
            Ok(index) if index >= 1 => rubric.criteria.get(index - 1),
            _ => rubric
                .criteria
                .iter()
                .find(|c| normalize_name(&c.title) == normalize_name(key)),
        };
        let criterion = criterion.ok_or_else(|| {
            RubricaError::validation(format!("criterio desconocido: {}", key))
        })?;
        points.insert(criterion.title.clone(), *value);
    }
    Ok(points)
}

fn show(
    cli: &Cli,
    course: &str,
    delivery: Delivery,
    subject: &str,
    rubric_type: Option<RubricType>,
) -> Result<()> {
    let store = open_store(cli)?;
    let rubric_type = rubric_type.unwrap_or(store.config().default_rubric_type);
    let key = Evaluation::make_key(course, delivery, rubric_type, subject);

    let evaluations = store.load_evaluations()?;
    let eval = evaluations
        .get(&key)
        .ok_or_else(|| RubricaError::EvaluationNotFound { key: key.clone() })?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(eval)?),
        OutputFormat::Human => {
            println!("{} (rúbrica {})", key, eval.rubric_id);
            for (criterion, value) in &eval.points {
                println!("  {}: {}", criterion, value);
            }
            println!("total: {}", eval.total);
        }
    }
    Ok(())
}

fn delete(
    cli: &Cli,
    course: &str,
    delivery: Delivery,
    subject: &str,
    rubric_type: Option<RubricType>,
) -> Result<()> {
    let store = open_store(cli)?;
    let rubric_type = rubric_type.unwrap_or(store.config().default_rubric_type);
    let key = Evaluation::make_key(course, delivery, rubric_type, subject);

    let mut evaluations = store.load_evaluations()?;
    if evaluations.remove(&key).is_none() {
        return Err(RubricaError::EvaluationNotFound { key });
    }
    store.save_evaluations(&evaluations)?;

    match cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "clave": key,
                    "eliminada": true,
                }))?
            );
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("eliminada: {}", key);
            }
        }
    }
    Ok(())
}
