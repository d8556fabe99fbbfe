//! Command dispatch logic for rubrica

use rubrica_core::error::{Result, RubricaError};

use crate::cli::{Cli, Commands};
use crate::commands;

pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        None => Err(RubricaError::UsageError(
            "no command given (try --help)".to_string(),
        )),

        Some(Commands::Init { visible }) => commands::init::execute(cli, *visible),

        Some(Commands::Create(args)) => commands::create::execute(cli, args),

        Some(Commands::List {
            course,
            r#type,
            delivery,
            active,
        }) => commands::list::execute(cli, course.as_deref(), *r#type, *delivery, *active),

        Some(Commands::Show { id_or_code }) => commands::show::execute(cli, id_or_code),

        Some(Commands::Import(args)) => commands::import::execute(cli, args),

        Some(Commands::Export {
            id_or_code,
            to,
            output,
        }) => commands::export::execute(cli, id_or_code, to, output.as_deref()),

        Some(Commands::Compare { a, b }) => commands::compare::execute(cli, a, b),

        Some(Commands::Publish { id_or_code }) => commands::publish::execute(cli, id_or_code),

        Some(Commands::NewVersion { id_or_code }) => {
            commands::new_version::execute(cli, id_or_code)
        }

        Some(Commands::Activate { id_or_code }) => commands::activate::execute(cli, id_or_code),

        Some(Commands::Delete { id_or_code }) => commands::delete::execute(cli, id_or_code),

        Some(Commands::Eval { command }) => commands::eval::execute(cli, command),

        Some(Commands::Course { command }) => commands::course::execute(cli, command),

        Some(Commands::Canvas { command }) => commands::canvas::execute(cli, command),
    }
}
