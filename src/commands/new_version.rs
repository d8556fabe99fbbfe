//! `rubrica new-version` - sibling draft of an existing rubric
//!
//! The sibling gets a fresh id and no code or version; those are assigned
//! when it is published.

use rubrica_core::error::Result;
use rubrica_core::store::RubricRepository;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::{open_store, resolve_id};

pub fn execute(cli: &Cli, id_or_code: &str) -> Result<()> {
    let store = open_store(cli)?;
    let mut set = store.load_rubrics()?;
    let id = resolve_id(&set, id_or_code)?;

    let sibling = set.get(&id).expect("resolved id").new_version();
    let sibling_id = sibling.id.clone();
    set.put(sibling);
    store.save_rubrics(&set)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": sibling_id,
                "basada_en": id,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{}", sibling_id);
            if !cli.quiet {
                eprintln!("borrador basado en {}", id);
            }
        }
    }

    Ok(())
}
