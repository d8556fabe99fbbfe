//! `rubrica canvas` - operations on a course's attached grade file

use std::fs;
use std::path::Path;

use rubrica_core::canvas::GradeFile;
use rubrica_core::error::{Result, RubricaError};
use rubrica_core::model::{CourseState, Delivery};

use crate::cli::{Cli, CanvasCommands, OutputFormat};
use crate::commands::helpers::open_store;

pub fn execute(cli: &Cli, command: &CanvasCommands) -> Result<()> {
    match command {
        CanvasCommands::Show { course } => show(cli, course),
        CanvasCommands::SetScore {
            course,
            student,
            delivery,
            value,
        } => set_score(cli, course, student, *delivery, value),
        CanvasCommands::Export { course, output } => export(cli, course, output.as_deref()),
    }
}

fn attachment(course: &CourseState) -> Result<GradeFile> {
    let file = course
        .canvas_file
        .as_ref()
        .ok_or_else(|| RubricaError::InvalidGradeFile {
            reason: format!("el curso {} no tiene archivo Canvas adjunto", course.code),
        })?;
    GradeFile::parse(&file.content)
}

fn require_course<'a>(
    courses: &'a std::collections::BTreeMap<String, CourseState>,
    code: &str,
) -> Result<&'a CourseState> {
    courses.get(code).ok_or_else(|| RubricaError::CourseNotFound {
        code: code.to_string(),
    })
}

fn show(cli: &Cli, course_code: &str) -> Result<()> {
    let store = open_store(cli)?;
    let courses = store.load_courses()?;
    let course = require_course(&courses, course_code)?;
    let file = attachment(course)?;
    let config = &store.config().canvas;

    match cli.format {
        OutputFormat::Json => {
            let students: Vec<_> = (0..file.students().len())
                .map(|row| {
                    serde_json::json!({
                        "estudiante": file.students()[row].first(),
                        "e1": file.score(row, Delivery::First, config),
                        "e2": file.score(row, Delivery::Second, config),
                        "ef": file.score(row, Delivery::Final, config),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&students)?);
        }
        OutputFormat::Human => {
            for row in 0..file.students().len() {
                println!(
                    "{:<30} E1={:<6} E2={:<6} EF={}",
                    file.students()[row].first().map(String::as_str).unwrap_or(""),
                    file.score(row, Delivery::First, config).unwrap_or("-"),
                    file.score(row, Delivery::Second, config).unwrap_or("-"),
                    file.score(row, Delivery::Final, config).unwrap_or("-"),
                );
            }
        }
    }
    Ok(())
}

fn set_score(
    cli: &Cli,
    course_code: &str,
    student: &str,
    delivery: Delivery,
    value: &str,
) -> Result<()> {
    let store = open_store(cli)?;
    let mut courses = store.load_courses()?;
    let course = require_course(&courses, course_code)?;
    let mut file = attachment(course)?;
    let config = store.config().canvas.clone();

    let row = file
        .find_student(student)
        .ok_or_else(|| RubricaError::InvalidGradeFile {
            reason: format!("estudiante no encontrado: {}", student),
        })?;
    file.set_score(row, delivery, &config, value)?;
    let rendered = file.render()?;

    let course = courses.get_mut(course_code).expect("checked above");
    if let Some(attachment) = course.canvas_file.as_mut() {
        attachment.content = rendered;
    }
    store.save_courses(&courses)?;

    match cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "curso": course_code,
                    "estudiante": student,
                    "entrega": delivery.to_string(),
                    "valor": value,
                }))?
            );
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("{} {} = {}", student, delivery, value);
            }
        }
    }
    Ok(())
}

fn export(cli: &Cli, course_code: &str, output: Option<&Path>) -> Result<()> {
    let store = open_store(cli)?;
    let courses = store.load_courses()?;
    let course = require_course(&courses, course_code)?;
    let file = course
        .canvas_file
        .as_ref()
        .ok_or_else(|| RubricaError::InvalidGradeFile {
            reason: format!("el curso {} no tiene archivo Canvas adjunto", course_code),
        })?;

    match output {
        Some(path) => {
            fs::write(path, &file.content)?;
            if !cli.quiet && cli.format == OutputFormat::Human {
                eprintln!("exportado a {}", path.display());
            }
        }
        None => print!("{}", file.content),
    }
    Ok(())
}
