//! `rubrica activate` - make one version the active one in its family

use rubrica_core::activate;
use rubrica_core::error::Result;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::{open_store, resolve_id};

pub fn execute(cli: &Cli, id_or_code: &str) -> Result<()> {
    let store = open_store(cli)?;
    let mut set = store.load_rubrics()?;
    let id = resolve_id(&set, id_or_code)?;

    let touched = activate::activate(&mut set, &id)?;
    store.save_rubrics(&set)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": id,
                "actualizadas": touched,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("activada: {} ({} rúbricas actualizadas)", id, touched);
            }
        }
    }

    Ok(())
}
