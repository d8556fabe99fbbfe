//! `rubrica show` - print one rubric in full

use rubrica_core::error::{Result, RubricaError};
use rubrica_core::model::Rubric;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::open_store;

pub fn execute(cli: &Cli, id_or_code: &str) -> Result<()> {
    let store = open_store(cli)?;
    let set = store.load_rubrics()?;
    let rubric = set
        .resolve(id_or_code)
        .ok_or_else(|| RubricaError::RubricNotFound {
            id: id_or_code.to_string(),
        })?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rubric)?),
        OutputFormat::Human => print_human(rubric),
    }
    Ok(())
}

fn print_human(rubric: &Rubric) {
    println!("{}", rubric.name);
    println!("id:      {}", rubric.id);
    println!("código:  {}", rubric.code.as_deref().unwrap_or("-"));
    println!(
        "tipo:    {} / {}  versión {}",
        rubric.rubric_type,
        rubric.delivery,
        rubric
            .version
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    let courses: Vec<&str> = rubric.courses.iter().map(String::as_str).collect();
    println!("cursos:  {}", courses.join(", "));
    println!(
        "estado:  {}{}",
        rubric.status,
        if rubric.active { " [activa]" } else { "" }
    );
    println!("total:   {}", rubric.total_points);

    for criterion in &rubric.criteria {
        println!("  {} ({})", criterion.title, criterion.weight);
        for level in &criterion.levels {
            println!(
                "    {}-{}  {}  {}",
                level.min_points, level.max_points, level.title, level.description
            );
        }
    }

    if !rubric.grading_scale.is_empty() {
        println!("escala:");
        for band in &rubric.grading_scale {
            println!(
                "  {}%-{}%  {}",
                band.min_percent, band.max_percent, band.label
            );
        }
    }
}
