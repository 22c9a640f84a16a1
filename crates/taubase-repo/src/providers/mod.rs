//! Sub-repository providers

pub mod cached;
pub mod memory;
pub mod nodelink;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use taubase_core::Graph;

use crate::cancel::CancellationToken;
use crate::config::{RepositoryConfig, SourceFormat};
use crate::error::RepoError;
use crate::metadata::RepositoryMetadata;

pub use cached::CachedGraphRepository;
pub use memory::StaticRepository;
pub use nodelink::NodeLinkRepository;

/// Per-fetch options handed to every provider.
#[derive(Debug, Clone, Default)]
pub struct FetchContext {
    /// Report progress while building (logged at `info` instead of `debug`).
    pub use_progress: bool,
    pub cancel: CancellationToken,
}

/// A source contributing one finished graph to an aggregate.
pub trait Repository: Send + Sync {
    /// `None` makes the provider unusable in an aggregate.
    fn metadata(&self) -> Option<&RepositoryMetadata>;

    /// Produce a fresh graph. Called once per aggregation; implementations
    /// should poll `ctx.cancel` during long work.
    fn get_graph(&self, ctx: &FetchContext) -> Result<Graph>;
}

/// Factory function to create providers from configuration
pub fn create_provider(config: &RepositoryConfig) -> Result<Arc<dyn Repository>, RepoError> {
    let metadata = config.metadata();
    let format = match config.format {
        Some(format) => format,
        None => infer_format(&config.path).ok_or_else(|| {
            RepoError::Configuration(format!(
                "cannot infer the format of {} for repository {}; set `format`",
                config.path.display(),
                config.name
            ))
        })?,
    };

    let provider: Arc<dyn Repository> = match format {
        SourceFormat::Nodelink => Arc::new(NodeLinkRepository::new(metadata, &config.path)),
        SourceFormat::Binary => Arc::new(CachedGraphRepository::new(metadata, &config.path)),
    };
    Ok(provider)
}

fn infer_format(path: &Path) -> Option<SourceFormat> {
    let file_name = path.file_name()?.to_str()?;
    if file_name.ends_with(".json") {
        Some(SourceFormat::Nodelink)
    } else if file_name.ends_with(".cache") || file_name.ends_with(".bin") {
        Some(SourceFormat::Binary)
    } else {
        None
    }
}

/// Log a provider's finished graph at the level its context asks for.
pub(crate) fn report_loaded(ctx: &FetchContext, name: &str, graph: &Graph) {
    if ctx.use_progress {
        tracing::info!(
            "{}: {} nodes, {} edges",
            name,
            graph.node_count(),
            graph.edge_count()
        );
    } else {
        tracing::debug!(
            "{}: {} nodes, {} edges",
            name,
            graph.node_count(),
            graph.edge_count()
        );
    }
}
