//! `rubrica export` - render a rubric in an interchange format

use std::fs;
use std::path::Path;

use rubrica_core::error::{Result, RubricaError};
use rubrica_core::format::{self, ImportFormat};

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::open_store;

pub fn execute(cli: &Cli, id_or_code: &str, to: &str, output: Option<&Path>) -> Result<()> {
    let target: ImportFormat = to.parse()?;
    let store = open_store(cli)?;
    let set = store.load_rubrics()?;
    let rubric = set
        .resolve(id_or_code)
        .ok_or_else(|| RubricaError::RubricNotFound {
            id: id_or_code.to_string(),
        })?;

    let rendered = format::export(rubric, target)?;

    match output {
        Some(path) => {
            fs::write(path, &rendered)?;
            if !cli.quiet && cli.format == OutputFormat::Human {
                eprintln!("exportada a {}", path.display());
            }
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
