//! Aggregation engine for TauBase
//!
//! A [`DistributedRepo`] owns a list of sub-repositories, unions their
//! graphs into one, attaches combined metadata, and republishes the result
//! through an [`ExportPipeline`] whose binary artifact doubles as a cache.

pub mod cancel;
pub mod config;
pub mod drepo;
pub mod error;
pub mod export;
pub mod lock;
pub mod metadata;
pub mod providers;
pub mod service;


#[cfg(test)]
pub mod test_utils;

pub use cancel::CancellationToken;
pub use config::{Config, DEFAULT_CONFIG_FILE, ExportConfig, RepositoryConfig, SourceFormat};
pub use drepo::{DistributedRepo, DistributedRepoBuilder, GraphOutcome, GraphRequest, GraphSource};
pub use error::{ExportFailure, RepoError};
pub use export::{ExportError, ExportOutcome, ExportPipeline, ExportReport, Exporter, Requirement};
pub use metadata::{CombinedMetadata, RepositoryMetadata, serialize_authors};
pub use providers::{FetchContext, Repository, create_provider};
pub use service::GraphService;
