//! Multi-format export of a combined graph
//!
//! The binary artifact is staged first and only committed once every
//! mandatory exporter has written its file, so a failed or cancelled run
//! never leaves a cache hit behind. Optional exporters run after the commit,
//! each isolated from the others: unavailable ones are skipped, failing ones
//! are logged and recorded in the [`ExportReport`].

mod formats;
mod optional;

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use taubase_core::{FormatError, Graph, StagedArtifact, graph_cache_path, remove_artifact, write_atomic};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::error::{ExportFailure, RepoError};

pub use formats::{GmtExporter, GraphMlExporter, NodeLinkExporter, SifExporter};
pub use optional::{CxExporter, HtmlExporter, StatementsExporter};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("exporter unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Failure aborts the export and the artifact is not committed.
    Mandatory,
    /// Failure or absence is recorded and the pipeline moves on.
    Optional,
}

/// One output format of the pipeline.
pub trait Exporter: Send + Sync {
    fn name(&self) -> &str;

    /// File name inside the export directory.
    fn file_name(&self, repo_name: &str) -> String;

    fn requirement(&self) -> Requirement;

    /// Whether the capability this exporter relies on is present.
    fn is_available(&self) -> bool {
        true
    }

    /// The file name does not depend on the repository, so every aggregate
    /// exporting to the same directory writes the same file.
    fn is_shared(&self) -> bool {
        false
    }

    fn write(&self, graph: &Graph, out: &mut dyn Write) -> Result<(), ExportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    Skipped(String),
    Failed(String),
}

/// What happened to every exporter during one run.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// The committed binary artifact.
    pub primary: PathBuf,
    pub outcomes: Vec<(String, ExportOutcome)>,
}

impl ExportReport {
    fn new(primary: PathBuf) -> Self {
        ExportReport {
            primary,
            outcomes: Vec::new(),
        }
    }

    fn record(&mut self, exporter: &str, outcome: ExportOutcome) {
        self.outcomes.push((exporter.to_string(), outcome));
    }

    pub fn outcome(&self, exporter: &str) -> Option<&ExportOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == exporter)
            .map(|(_, outcome)| outcome)
    }

    /// Every file written, the primary artifact first.
    pub fn written(&self) -> Vec<&Path> {
        let mut paths = vec![self.primary.as_path()];
        paths.extend(self.outcomes.iter().filter_map(|(_, outcome)| match outcome {
            ExportOutcome::Written(path) => Some(path.as_path()),
            _ => None,
        }));
        paths
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|(name, outcome)| match outcome {
            ExportOutcome::Failed(message) => Some((name.as_str(), message.as_str())),
            _ => None,
        })
    }
}

/// Ordered registry of exporters.
pub struct ExportPipeline {
    exporters: Vec<Box<dyn Exporter>>,
    disabled: BTreeSet<String>,
}

impl Default for ExportPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl ExportPipeline {
    /// A pipeline with no exporters; only the binary artifact is written.
    pub fn empty() -> Self {
        ExportPipeline {
            exporters: Vec::new(),
            disabled: BTreeSet::new(),
        }
    }

    /// nodelink, sif, gmt, graphml (mandatory); statements, cx, html (optional).
    pub fn standard() -> Self {
        Self::empty()
            .with_exporter(NodeLinkExporter)
            .with_exporter(SifExporter)
            .with_exporter(GmtExporter)
            .with_exporter(GraphMlExporter)
            .with_exporter(StatementsExporter)
            .with_exporter(CxExporter)
            .with_exporter(HtmlExporter)
    }

    pub fn with_exporter(mut self, exporter: impl Exporter + 'static) -> Self {
        self.register(Box::new(exporter));
        self
    }

    /// Add an exporter, replacing any registered under the same name.
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        match self.exporters.iter().position(|e| e.name() == exporter.name()) {
            Some(pos) => self.exporters[pos] = exporter,
            None => self.exporters.push(exporter),
        }
    }

    /// Turn off optional exporters by name. Mandatory or unknown names are rejected.
    pub fn disable<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), RepoError> {
        for name in names {
            let name = name.as_ref();
            let exporter = self
                .exporters
                .iter()
                .find(|e| e.name() == name)
                .ok_or_else(|| RepoError::Configuration(format!("unknown exporter: {}", name)))?;
            if exporter.requirement() == Requirement::Mandatory {
                return Err(RepoError::Configuration(format!(
                    "exporter {} is mandatory and cannot be disabled",
                    name
                )));
            }
            self.disabled.insert(name.to_string());
        }
        Ok(())
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.contains(name)
    }

    pub fn exporters(&self) -> impl Iterator<Item = &dyn Exporter> {
        self.exporters.iter().map(|e| {
            let exporter: &dyn Exporter = e.as_ref();
            exporter
        })
    }

    /// Every path a run produces for `name` in `directory` that belongs to
    /// this repository alone. Files of [shared](Exporter::is_shared) exporters are left out.
    pub fn artifact_paths(&self, directory: &Path, name: &str) -> Vec<PathBuf> {
        let mut paths = vec![graph_cache_path(directory, name)];
        paths.extend(
            self.exporters()
                .filter(|e| !e.is_shared())
                .map(|e| directory.join(e.file_name(name))),
        );
        paths
    }

    /// Write `graph` in every format.
    ///
    /// A mandatory failure returns [`RepoError::Export`] carrying the graph;
    /// the binary artifact is then absent. Cancellation is reported as an
    /// error only up to the commit; afterwards the remaining optional
    /// exporters are recorded as skipped.
    pub fn export(
        &self,
        graph: &Graph,
        directory: &Path,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<ExportReport, RepoError> {
        let primary = graph_cache_path(directory, name);

        cancel.check()?;
        if remove_artifact(&primary)? {
            debug!("Removed stale artifact {}", primary.display());
        }
        let staged = StagedArtifact::stage(graph, &primary)?;
        let mut report = ExportReport::new(primary);

        for exporter in self.of(Requirement::Mandatory) {
            cancel.check()?;
            let path = directory.join(exporter.file_name(name));
            let result = if exporter.is_available() {
                write_atomic(&path, |out| exporter.write(graph, out))
            } else {
                Err(ExportError::Unavailable(exporter.name().to_string()))
            };
            if let Err(error) = result {
                return Err(RepoError::Export(Box::new(ExportFailure {
                    exporter: exporter.name().to_string(),
                    path,
                    error,
                    graph: graph.clone(),
                })));
            }
            debug!("Exported {} to {}", exporter.name(), path.display());
            report.record(exporter.name(), ExportOutcome::Written(path));
        }

        cancel.check()?;
        let primary = staged.commit()?;
        info!("Graph artifact written to {}", primary.display());

        // The artifact is committed; cancellation now only skips what is left.
        for exporter in self.of(Requirement::Optional) {
            let outcome = if cancel.is_cancelled() {
                debug!("Skipping {} export: cancelled", exporter.name());
                ExportOutcome::Skipped("cancelled".to_string())
            } else {
                self.run_optional(exporter, graph, directory, name)
            };
            report.record(exporter.name(), outcome);
        }

        Ok(report)
    }

    fn run_optional(
        &self,
        exporter: &dyn Exporter,
        graph: &Graph,
        directory: &Path,
        name: &str,
    ) -> ExportOutcome {
        if self.is_disabled(exporter.name()) {
            debug!("Skipping {} export: disabled", exporter.name());
            return ExportOutcome::Skipped("disabled by configuration".to_string());
        }
        if !exporter.is_available() {
            debug!("Skipping {} export: unavailable", exporter.name());
            return ExportOutcome::Skipped("capability unavailable".to_string());
        }

        let path = directory.join(exporter.file_name(name));
        match write_atomic(&path, |out| exporter.write(graph, out)) {
            Ok(()) => {
                debug!("Exported {} to {}", exporter.name(), path.display());
                ExportOutcome::Written(path)
            }
            Err(ExportError::Unavailable(reason)) => {
                debug!("Skipping {} export: {}", exporter.name(), reason);
                ExportOutcome::Skipped(reason)
            }
            Err(e) => {
                warn!("Optional {} export failed: {}", exporter.name(), e);
                ExportOutcome::Failed(e.to_string())
            }
        }
    }

    fn of(&self, requirement: Requirement) -> impl Iterator<Item = &dyn Exporter> {
        self.exporters().filter(move |e| e.requirement() == requirement)
    }
}
