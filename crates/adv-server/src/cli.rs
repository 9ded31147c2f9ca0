use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `adversary` binary.
#[derive(Debug, Parser)]
#[command(
    name = "adversary",
    version,
    about = "L ≡ T adversary - batch verdict simulation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP trigger; each request runs one full batch
    Serve {
        /// Listen address (defaults to `simulation.bind_addr`)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run one batch now and print the summary as JSON
    Run {
        /// Input CSV (defaults to `simulation.input_path`)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Keep verdicts in memory instead of writing to Cosmos DB
        #[arg(long)]
        dry_run: bool,
    },
}
