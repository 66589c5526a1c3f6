//! framelog CLI
//!
//! Command-line tools for framelog.
//!
//! # Commands
//!
//! - `serve` - Run the produce/consume HTTP server over a log file
//! - `inspect` - Display frame statistics for a store file
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// framelog command-line tools.
#[derive(Parser)]
#[command(name = "framelog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the produce/consume HTTP server
    Serve {
        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        addr: String,

        /// Path to the log file
        #[arg(short, long)]
        path: PathBuf,
    },

    /// Display frame statistics for a store file
    Inspect {
        /// Path to the store file
        #[arg(short, long)]
        path: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve { addr, path } => {
            commands::serve::run(&addr, &path)?;
        }
        Commands::Inspect { path, format } => {
            commands::inspect::run(&path, &format)?;
        }
        Commands::Version => {
            println!("framelog CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("framelog core v{}", framelog_core::VERSION);
        }
    }

    Ok(())
}
