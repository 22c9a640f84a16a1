//! TauBase CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taubase_repo::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "taubase")]
#[command(about = "Aggregate distributed knowledge graphs into one cached, exported graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file
    #[arg(short, long, default_value = taubase_repo::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Artifact directory (overrides the configured one)
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the combined graph and write every export
    Build {
        /// Rebuild even if a cached artifact exists
        #[arg(long)]
        no_cache: bool,

        /// Fetch sub-repositories one after another
        #[arg(long)]
        sequential: bool,
    },
    /// Print summary statistics of the combined graph as JSON
    Summary,
    /// Print the causal statements of the combined graph as JSON
    Statements,
    /// Remove cached and exported artifacts
    Clear,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "taubase={0},taubase_core={0},taubase_repo={0}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cancel = CancellationToken::new();
    let signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            signal.cancel();
        }
    });

    let options = commands::Options {
        config: cli.config,
        directory: cli.directory,
        cancel,
    };

    match cli.command {
        Commands::Build { no_cache, sequential } => {
            commands::build(options, !no_cache, sequential).await
        }
        Commands::Summary => {
            commands::summary(options).await
        }
        Commands::Statements => {
            commands::statements(options).await
        }
        Commands::Clear => {
            commands::clear(options)
        }
        Commands::Version => {
            println!("TauBase v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
