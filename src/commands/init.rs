//! `rubrica init` - initialize a new store

use rubrica_core::config::InitOptions;
use rubrica_core::error::Result;
use rubrica_core::store::Store;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::resolve_root;

pub fn execute(cli: &Cli, visible: bool) -> Result<()> {
    let store = match &cli.store {
        Some(path) => Store::init_at(path)?,
        None => Store::init(&resolve_root(cli), InitOptions { visible })?,
    };

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "store": store.root().display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Initialized rubrica store at {}", store.root().display());
            }
        }
    }

    Ok(())
}
