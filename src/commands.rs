//! CLI command implementations

use std::path::PathBuf;

use anyhow::Context;
use taubase_repo::{CancellationToken, Config, DistributedRepo, GraphRequest, GraphSource};

/// Settings shared by every command.
pub struct Options {
    pub config: PathBuf,
    pub directory: Option<PathBuf>,
    pub cancel: CancellationToken,
}

fn load_repo(options: &Options, sequential: bool) -> anyhow::Result<DistributedRepo> {
    let mut config = Config::load(&options.config)
        .with_context(|| format!("Failed to load {}", options.config.display()))?;
    if sequential {
        config.parallel = false;
    }
    tracing::info!(
        "TauBase v{}: {} with {} repositories",
        env!("CARGO_PKG_VERSION"),
        config.name,
        config.repositories.len()
    );
    Ok(config.into_repo()?)
}

fn request(options: &Options, allow_cache: bool) -> GraphRequest {
    GraphRequest {
        directory: options.directory.clone(),
        allow_cache,
        use_progress: true,
    }
}

pub async fn build(options: Options, allow_cache: bool, sequential: bool) -> anyhow::Result<()> {
    let repo = load_repo(&options, sequential)?;
    let request = request(&options, allow_cache);
    let cancel = options.cancel.clone();

    // Providers and exporters do blocking I/O
    let outcome = tokio::task::spawn_blocking(move || repo.load(&request, &cancel)).await??;

    match &outcome.source {
        GraphSource::Cache(path) => {
            tracing::info!("Using cached graph {}", path.display());
        }
        GraphSource::Built(report) => {
            for path in report.written() {
                println!("{}", path.display());
            }
            for (exporter, message) in report.failures() {
                tracing::warn!("{} export failed: {}", exporter, message);
            }
        }
    }

    tracing::info!(
        "Graph has {} nodes, {} edges",
        outcome.graph.node_count(),
        outcome.graph.edge_count()
    );
    Ok(())
}

pub async fn summary(options: Options) -> anyhow::Result<()> {
    let repo = load_repo(&options, false)?;
    let request = request(&options, true);
    let cancel = options.cancel.clone();

    let graph = tokio::task::spawn_blocking(move || repo.get_graph(&request, &cancel)).await??;

    println!("{}", serde_json::to_string_pretty(&graph.summary())?);
    Ok(())
}

pub async fn statements(options: Options) -> anyhow::Result<()> {
    let repo = load_repo(&options, false)?;
    let request = request(&options, true);
    let cancel = options.cancel.clone();

    let statements =
        tokio::task::spawn_blocking(move || repo.statements(&request, &cancel)).await??;

    tracing::info!("Extracted {} statements", statements.len());
    println!("{}", serde_json::to_string_pretty(&statements)?);
    Ok(())
}

pub fn clear(options: Options) -> anyhow::Result<()> {
    let repo = load_repo(&options, false)?;
    tracing::info!("Clearing artifacts for {}", repo.name());

    let removed = repo.clear(options.directory.as_deref())?;

    tracing::info!("Removed {} files", removed);
    Ok(())
}
