//! Aegis CLI - Offline upload analysis tool.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod exit_codes;
mod utils;

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0   Success
  1   General error
  66  Input file missing or unreadable";

#[derive(Parser)]
#[command(name = "aegis")]
#[command(author, version, about = "Shallow content analysis for uploaded files", long_about = None)]
#[command(after_help = EXIT_CODES_HELP)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a file the way the server does
    Analyze {
        /// Path to the file to analyze
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Declared media type (guessed from the extension when omitted)
        #[arg(short, long, value_name = "TYPE")]
        mime: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print SHA3-256 fingerprints and flag repeated content
    Fingerprint {
        /// Files to fingerprint
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        init_tracing();
    }

    let result = match cli.command {
        Commands::Analyze { file, mime, json } => commands::analyze::execute(file, mime, json),
        Commands::Fingerprint { files } => commands::fingerprint::execute(files),
    };

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(err) => {
            let exit = exit_codes::ExitStatus::from_anyhow(&err);
            eprintln!("{} {}", "error:".red().bold(), exit.message);
            ExitCode::from(exit.code)
        }
    }
}
