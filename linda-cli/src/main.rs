//! # linda CLI
//!
//! Command-line front end for the shared-memory tuple space: a script
//! runner and a parallel prime sieve demo.

mod commands;
mod config;
mod script;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linda")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "linda.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a script against a fresh tuple space
    Run {
        /// Script file, one command per line
        script: PathBuf,
    },

    /// Find primes by striking multiples out of a shared space
    Sieve {
        /// Largest candidate (overrides sieve.limit)
        #[arg(long)]
        limit: Option<i64>,

        /// Threads per prime (overrides sieve.workers)
        #[arg(long)]
        workers: Option<usize>,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,

        /// Print the space report when done
        #[arg(long)]
        debug: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so script output stays clean
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run { script } => commands::run_script(&cli.config, &script),
        Commands::Sieve {
            limit,
            workers,
            json,
            debug,
        } => commands::run_sieve(&cli.config, limit, workers, json, debug),
    }
}
