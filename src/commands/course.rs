//! `rubrica course` - course registration, rubric associations and the
//! attached Canvas grade file

use std::fs;
use std::path::Path;

use rubrica_core::canvas::GradeFile;
use rubrica_core::error::Result;
use rubrica_core::model::{CanvasAttachment, CourseState, Delivery, RubricType};

use crate::cli::{Cli, CourseCommands, OutputFormat};
use crate::commands::helpers::{open_store, resolve_id};

pub fn execute(cli: &Cli, command: &CourseCommands) -> Result<()> {
    match command {
        CourseCommands::Add { code, name } => add(cli, code, name.as_deref()),
        CourseCommands::SetRubric {
            course,
            delivery,
            r#type,
            rubric,
        } => set_rubric(cli, course, *delivery, *r#type, rubric),
        CourseCommands::Attach { course, file } => attach(cli, course, file),
        CourseCommands::List => list(cli),
        CourseCommands::Delete { course } => delete(cli, course),
    }
}

fn add(cli: &Cli, code: &str, name: Option<&str>) -> Result<()> {
    let store = open_store(cli)?;
    let mut courses = store.load_courses()?;

    let course = courses
        .entry(code.to_string())
        .or_insert_with(|| CourseState::new(code));
    if let Some(name) = name {
        course.name = Some(name.to_string());
    }
    store.save_courses(&courses)?;

    report_ok(cli, code, "registrado")
}

fn set_rubric(
    cli: &Cli,
    course_code: &str,
    delivery: Delivery,
    rubric_type: RubricType,
    rubric_ref: &str,
) -> Result<()> {
    let store = open_store(cli)?;
    let set = store.load_rubrics()?;
    let rubric_id = resolve_id(&set, rubric_ref)?;

    let mut courses = store.load_courses()?;
    let course = courses
        .entry(course_code.to_string())
        .or_insert_with(|| CourseState::new(course_code));
    course.set_rubric(delivery, rubric_type, &rubric_id);
    store.save_courses(&courses)?;

    report_ok(cli, course_code, "asociada")
}

fn attach(cli: &Cli, course_code: &str, file: &Path) -> Result<()> {
    let store = open_store(cli)?;
    let content = fs::read_to_string(file)?;

    // reject files the grade parser cannot read back
    GradeFile::parse(&content)?;

    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("canvas.csv")
        .to_string();

    let mut courses = store.load_courses()?;
    let course = courses
        .entry(course_code.to_string())
        .or_insert_with(|| CourseState::new(course_code));
    course.canvas_file = Some(CanvasAttachment { file_name, content });
    store.save_courses(&courses)?;

    report_ok(cli, course_code, "archivo adjuntado")
}

fn list(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let courses = store.load_courses()?;

    match cli.format {
        OutputFormat::Json => {
            let items: Vec<_> = courses
                .values()
                .map(|c| {
                    serde_json::json!({
                        "codigo": c.code,
                        "nombre": c.name,
                        "asociaciones": c.rubric_slots.len(),
                        "archivo_canvas": c.canvas_file.as_ref().map(|f| &f.file_name),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        OutputFormat::Human => {
            for course in courses.values() {
                println!(
                    "{}  {}  {} asociaciones{}",
                    course.code,
                    course.name.as_deref().unwrap_or("-"),
                    course.rubric_slots.len(),
                    course
                        .canvas_file
                        .as_ref()
                        .map(|f| format!("  [{}]", f.file_name))
                        .unwrap_or_default()
                );
            }
            if !cli.quiet {
                eprintln!("{} cursos", courses.len());
            }
        }
    }
    Ok(())
}

fn delete(cli: &Cli, course_code: &str) -> Result<()> {
    let store = open_store(cli)?;
    let removed = store.delete_course(course_code)?;

    match cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "codigo": course_code,
                    "evaluaciones_eliminadas": removed,
                }))?
            );
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "eliminado: {} ({} evaluaciones en cascada)",
                    course_code, removed
                );
            }
        }
    }
    Ok(())
}

fn report_ok(cli: &Cli, code: &str, action: &str) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "codigo": code,
                    "resultado": action,
                }))?
            );
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("{}: {}", action, code);
            }
        }
    }
    Ok(())
}
