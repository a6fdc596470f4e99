//! Command execution

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::PokedexService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::menu::Menu;
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{Catalog, Category};

/// Execute the CLI command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None | Some(Commands::Run) => cmd_run(cli),
        Some(Commands::Catalog {
            category,
            evolvable,
        }) => cmd_catalog(category.as_deref(), *evolvable),
        Some(Commands::Config { command }) => execute_config_command(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    Ok(Settings::load(cli.config.as_deref())?)
}

#[instrument(skip(cli))]
fn cmd_run(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    debug!(?settings, "starting menu");
    let service = PokedexService::new(settings);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(service, stdin.lock(), stdout.lock());
    menu.run().map_err(|e| CliError::io("interactive session", e))
}

#[instrument]
fn cmd_catalog(category: Option<&str>, evolvable: bool) -> CliResult<()> {
    let category = category
        .map(|c| c.parse::<Category>())
        .transpose()
        .map_err(|e| CliError::InvalidArgs(e.to_string()))?;

    let catalog = Catalog::builtin();
    let mut out = io::stdout().lock();
    let mut shown = 0usize;
    for record in catalog.records().iter().filter(|r| {
        category.map_or(true, |c| r.category == c) && (!evolvable || r.evolvable)
    }) {
        output::info(&mut out, record).map_err(|e| CliError::io("write catalog", e))?;
        shown += 1;
    }
    if shown == 0 {
        output::warning(&mut out, "no matching entries")
            .map_err(|e| CliError::io("write catalog", e))?;
    }
    out.flush().map_err(|e| CliError::io("flush stdout", e))
}

fn execute_config_command(cli: &Cli, cmd: &ConfigCommands) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            print!("{}", settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Template => {
            print!("{}", Settings::template());
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let status = if path.exists() { "exists" } else { "not found" };
                    println!("{} ({status})", path.display());
                }
                None => println!("No config directory available on this platform"),
            }
            Ok(())
        }
    }
}
