use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod server;
mod trigger;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("adversary error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let startup = bootstrap::load();

    match cli.command {
        cli::Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| startup.simulation().bind_addr.clone());
            server::serve(startup, &bind).await
        }
        cli::Commands::Run { input, dry_run } => run_once(startup, input, dry_run).await,
    }
}

async fn run_once(
    startup: bootstrap::Startup,
    input: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut config = startup.config.context("failed to load configuration")?;
    if let Some(input) = input {
        config.simulation.input_path = input.to_string_lossy().into_owned();
    }

    let summary = if dry_run {
        if !config.openai.is_configured() {
            anyhow::bail!("dry run needs AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_KEY");
        }
        let completion = adv_llm::AzureOpenAiClient::new(&config.openai)?;
        let store = adv_store::MemoryStore::new();
        adv_sim::run_batch(
            std::path::Path::new(&config.simulation.input_path),
            &completion,
            &store,
        )
        .await?
    } else {
        adv_sim::run_with_config(&config).await?
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ADVERSARY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
