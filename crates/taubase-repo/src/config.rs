//! `taubase.toml` configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::drepo::DistributedRepo;
use crate::error::RepoError;
use crate::export::ExportPipeline;
use crate::metadata::RepositoryMetadata;
use crate::providers::create_provider;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "taubase.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub name: String,
    /// Release version of the aggregate.
    #[serde(default)]
    pub version: Option<String>,
    /// Default artifact directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,
}

fn default_parallel() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Optional exporters to skip.
    #[serde(default)]
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub description: String,
    pub path: PathBuf,
    /// Inferred from the file extension when absent.
    #[serde(default)]
    pub format: Option<SourceFormat>,
}

impl RepositoryConfig {
    pub fn metadata(&self) -> RepositoryMetadata {
        RepositoryMetadata::new(&self.name, &self.version)
            .with_authors(&self.authors)
            .with_description(&self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Node-link JSON.
    Nodelink,
    /// Binary graph artifact.
    Binary,
}

impl Config {
    /// Read a config file; relative paths inside it resolve against its directory.
    pub fn load(path: &Path) -> Result<Self, RepoError> {
        let text = fs::read_to_string(path).map_err(|e| {
            RepoError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&text, base)
            .map_err(|e| RepoError::Configuration(format!("{}: {}", path.display(), e)))
    }

    /// Parse TOML text, resolving relative paths against `base`.
    pub fn parse(text: &str, base: &Path) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(text)?;
        config.resolve_paths(base);
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        if let Some(directory) = &self.directory {
            self.directory = Some(resolve(base, directory));
        }
        for repository in &mut self.repositories {
            repository.path = resolve(base, &repository.path);
        }
    }

    /// Build providers, the export pipeline and the orchestrator.
    pub fn into_repo(self) -> Result<DistributedRepo, RepoError> {
        let mut pipeline = ExportPipeline::standard();
        pipeline.disable(&self.export.disabled)?;

        let providers = self
            .repositories
            .iter()
            .map(create_provider)
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = DistributedRepo::builder(self.name)
            .repositories(providers)
            .pipeline(pipeline)
            .parallel(self.parallel);
        if let Some(version) = self.version {
            builder = builder.version(version);
        }
        if let Some(directory) = self.directory {
            builder = builder.directory(directory);
        }
        builder.build()
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
