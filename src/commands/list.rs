//! `rubrica list` - list rubrics with optional filters

use rubrica_core::error::Result;
use rubrica_core::model::{Delivery, Rubric, RubricType};
use rubrica_core::store::RubricRepository;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::open_store;

pub fn execute(
    cli: &Cli,
    course: Option<&str>,
    rubric_type: Option<RubricType>,
    delivery: Option<Delivery>,
    active_only: bool,
) -> Result<()> {
    let store = open_store(cli)?;
    let set = store.load_rubrics()?;

    let mut rubrics: Vec<&Rubric> = set
        .list()
        .into_iter()
        .filter(|r| course.is_none_or(|c| r.courses.contains(c)))
        .filter(|r| rubric_type.is_none_or(|t| r.rubric_type == t))
        .filter(|r| delivery.is_none_or(|d| r.delivery == d))
        .filter(|r| !active_only || r.active)
        .collect();
    rubrics.sort_by(|a, b| {
        a.code
            .as_deref()
            .unwrap_or("")
            .cmp(b.code.as_deref().unwrap_or(""))
            .then_with(|| a.id.cmp(&b.id))
    });

    match cli.format {
        OutputFormat::Json => {
            let items: Vec<_> = rubrics
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "id": r.id,
                        "codigo": r.code,
                        "version": r.version,
                        "nombre": r.name,
                        "tipo": r.rubric_type.to_string(),
                        "entrega": r.delivery.to_string(),
                        "cursos": r.courses,
                        "estado": r.status.to_string(),
                        "activa": r.active,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        OutputFormat::Human => {
            for rubric in &rubrics {
                println!(
                    "{}  {:<14} {:<9} {} {}",
                    rubric.id,
                    rubric.code.as_deref().unwrap_or("-"),
                    rubric.status.to_string(),
                    if rubric.active { "[activa]" } else { "        " },
                    rubric.name
                );
            }
            if !cli.quiet {
                eprintln!("{} rúbricas", rubrics.len());
            }
        }
    }

    Ok(())
}
