//! # solarnet CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// SOLARNET metadata toolchain.
///
/// Validates FITS headers against the SOLARNET keyword schema, generates
/// attribute templates for new headers, and indexes keyword usage across
/// the documentation.
#[derive(Parser, Debug)]
#[command(name = "solarnet", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate every header of a FITS file.
    Validate(solarnet_cli::validate::ValidateArgs),
    /// Print or write an attribute template for a new header.
    Template(solarnet_cli::template::TemplateArgs),
    /// Index documentation keywords and write the CSV summary.
    Index(solarnet_cli::index::IndexArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => solarnet_cli::validate::run(&args),
        Commands::Template(args) => solarnet_cli::template::run(&args),
        Commands::Index(args) => solarnet_cli::index::run(&args),
    }
}
