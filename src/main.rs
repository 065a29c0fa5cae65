//! Accord CLI entry point.

use clap::Parser;

use accord::cli::{Cli, Commands};
use accord::infrastructure::{logging, ConfigLoader};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    // Logging comes up before the command runs. A config that fails to load
    // here falls back to default logging; the command itself reports the
    // load error through the normal error path.
    let logging_config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .map(|config| config.logging)
    .unwrap_or_default();
    logging::init(&logging_config);

    let result = match &cli.command {
        Commands::Converge { manifest, dry_run } => {
            accord::cli::commands::converge::execute(manifest, *dry_run, config_path, cli.json)
                .await
        }
        Commands::Plan { manifest } => {
            accord::cli::commands::converge::execute(manifest, true, config_path, cli.json).await
        }
        Commands::Remove {
            username,
            manage_home,
        } => {
            accord::cli::commands::account::remove(username, *manage_home, config_path, cli.json)
                .await
        }
        Commands::Lock { username } => {
            accord::cli::commands::account::lock(username, config_path, cli.json).await
        }
        Commands::Unlock { username } => {
            accord::cli::commands::account::unlock(username, config_path, cli.json).await
        }
    };

    if let Err(err) = result {
        accord::cli::handle_error(&err, cli.json);
    }
}
