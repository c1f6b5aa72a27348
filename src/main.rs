//! Drømmekopp CLI
//!
//! Command-line interface for replaying and inspecting drink builder sessions.

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use drommekopp::cli::{commands, Cli, Commands};
use drommekopp::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays clean
    let default_filter = if cli.verbose { "debug" } else { "info" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Drømmekopp v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd, cli.config.as_deref()),
        None => {
            println!("Drømmekopp v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands, config: Option<&std::path::Path>) -> Result<()> {
    match cmd {
        Commands::Simulate {
            catalog,
            json,
            steps,
        } => commands::simulate(config, &catalog, &steps, json),
        Commands::Catalog { catalog } => commands::list_catalog(&catalog),
        Commands::Themes => commands::list_themes(),
        Commands::Slots { fill_level } => commands::show_slots(config, fill_level),
    }
}
