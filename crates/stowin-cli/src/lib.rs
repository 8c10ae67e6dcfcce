pub mod commands;
pub mod handlers;

use clap::Parser;

use commands::{Cli, Commands};
use handlers::{InstallHandler, ListHandler, RemoveHandler, SetupHandler};

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    stowin_logger::init_logger(false);

    match &cli.command {
        Commands::Install {
            name,
            source,
            target,
            debug,
        } => InstallHandler::install(name, source, target.as_deref(), *debug),
        Commands::Remove {
            names,
            target,
            debug,
        } => RemoveHandler::remove(names, target.as_deref(), *debug),
        Commands::List { target } => ListHandler::list(target.as_deref()),
        Commands::Setup { target, debug } => SetupHandler::setup(target.as_deref(), *debug),
    }
}
