//! Binary entry point for journal-search.
//!
//! This binary provides the CLI and the web form for the journal search.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use journal_search::cli::{SearchCommand, ServeCommand, USAGE};
use journal_search::config::JournalSearchConfig;
use journal_search::observability;
use journal_search::{Error, JournalSearchService, SearchFlags};
use std::path::PathBuf;
use std::process::ExitCode;

/// Journal search - query the INSPIRE journals catalog.
#[derive(Parser)]
#[command(name = "journal-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Search journals and print the matching records.
    Search {
        /// Search terms, joined with single spaces.
        #[arg(required = true)]
        terms: Vec<String>,

        /// Search short_title, journal_title and title_variants.
        #[arg(short, long)]
        name: bool,

        /// Search short_title and journal_title only.
        #[arg(short, long)]
        exact: bool,

        /// Print all fields.
        #[arg(short, long)]
        long: bool,

        /// Print all records (default up to the configured maximum).
        #[arg(short, long)]
        all: bool,
    },

    /// Run the search form over HTTP.
    Serve {
        /// Interface to bind.
        #[arg(long)]
        host: Option<String>,

        /// Port to bind.
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match JournalSearchConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::InvalidInput(e)) => {
            eprintln!("Error: {e}\n{USAGE}");
            ExitCode::FAILURE
        },
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(command: Commands, config: &JournalSearchConfig) -> journal_search::Result<()> {
    match command {
        Commands::Search {
            terms,
            name,
            exact,
            long,
            all,
        } => cmd_search(config, &terms, name, exact, long, all),

        Commands::Serve { host, port } => ServeCommand::new(host, port).run(config),
    }
}

/// Search command.
#[allow(clippy::fn_params_excessive_bools)]
fn cmd_search(
    config: &JournalSearchConfig,
    terms: &[String],
    name: bool,
    exact: bool,
    long: bool,
    all: bool,
) -> journal_search::Result<()> {
    let mut flags = SearchFlags::from_terms(terms)?;
    flags.name = name;
    flags.exact = exact;
    flags.long = long;
    flags.all = all;

    let service = JournalSearchService::from_config(config);
    let stdout = std::io::stdout();
    SearchCommand::new(config.max_results).execute(&service, &flags, &mut stdout.lock())?;
    Ok(())
}
