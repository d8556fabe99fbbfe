//! `rubrica delete` - remove a rubric (no soft delete)

use rubrica_core::error::Result;
use rubrica_core::store::RubricRepository;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::{open_store, resolve_id};

pub fn execute(cli: &Cli, id_or_code: &str) -> Result<()> {
    let store = open_store(cli)?;
    let mut set = store.load_rubrics()?;
    let id = resolve_id(&set, id_or_code)?;

    set.delete(&id);
    store.save_rubrics(&set)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "id": id, "eliminada": true });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("eliminada: {}", id);
            }
        }
    }

    Ok(())
}
