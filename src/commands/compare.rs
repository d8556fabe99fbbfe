//! `rubrica compare` - structural diff of two rubrics

use rubrica_core::compare;
use rubrica_core::error::{Result, RubricaError};

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::open_store;

pub fn execute(cli: &Cli, a: &str, b: &str) -> Result<()> {
    let store = open_store(cli)?;
    let set = store.load_rubrics()?;

    let first = set.resolve(a).ok_or_else(|| RubricaError::RubricNotFound {
        id: a.to_string(),
    })?;
    let second = set.resolve(b).ok_or_else(|| RubricaError::RubricNotFound {
        id: b.to_string(),
    })?;

    let result = compare::compare(first, second);

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Human => {
            if result.identical {
                println!("idénticas");
            } else {
                for difference in &result.differences {
                    println!("- {}", difference);
                }
            }
        }
    }

    Ok(())
}
