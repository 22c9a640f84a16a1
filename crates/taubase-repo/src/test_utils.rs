//! Test utilities for the aggregation engine

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use taubase_core::{Citation, Graph, GraphEdge, GraphNode, NodeKind, Relation};

use crate::cancel::CancellationToken;
use crate::export::{ExportError, Exporter, Requirement};
use crate::metadata::RepositoryMetadata;
use crate::providers::{FetchContext, Repository};

/// GSK3B phosphorylates MAPT; phospho-MAPT correlates with Alzheimer's disease.
pub fn hbp_graph() -> Graph {
    let mut graph = Graph::new();
    let gsk3b = graph.add_node(GraphNode::protein("HGNC", "GSK3B"));
    let phospho = graph.add_node(phospho_mapt());
    let ad = graph.add_node(GraphNode::new(
        NodeKind::Pathology,
        "MESH",
        "Alzheimer Disease",
    ));
    graph
        .add_edge(
            GraphEdge::new(gsk3b, phospho, Relation::DirectlyIncreases)
                .with_citation(Citation::pubmed("20000001")),
        )
        .unwrap();
    graph
        .add_edge(
            GraphEdge::new(phospho, ad, Relation::PositiveCorrelation)
                .with_citation(Citation::pubmed("20000002")),
        )
        .unwrap();
    graph
}

/// Shares the GSK3B -> pMAPT edge with [`hbp_graph`] and adds CDK5.
pub fn kinase_graph() -> Graph {
    let mut graph = Graph::new();
    let cdk5 = graph.add_node(GraphNode::protein("HGNC", "CDK5"));
    let gsk3b = graph.add_node(GraphNode::protein("HGNC", "GSK3B"));
    let phospho = graph.add_node(phospho_mapt());
    graph
        .add_edge(
            GraphEdge::new(gsk3b, phospho, Relation::DirectlyIncreases)
                .with_citation(Citation::pubmed("20000001")),
        )
        .unwrap();
    graph
        .add_edge(
            GraphEdge::new(cdk5, phospho, Relation::Increases)
                .with_citation(Citation::pubmed("20000003")),
        )
        .unwrap();
    graph
}

/// A graph with a single node, distinct per `name`.
pub fn single_node_graph(name: &str) -> Graph {
    let mut graph = Graph::new();
    graph.add_node(GraphNode::protein("HGNC", name));
    graph
}

fn phospho_mapt() -> GraphNode {
    GraphNode::protein("HGNC", "MAPT").with_variant("pmod(Ph, Ser, 202)")
}

/// Provider that counts how often its graph was requested.
pub struct CountingRepository {
    metadata: Option<RepositoryMetadata>,
    graph: Graph,
    calls: AtomicUsize,
}

impl CountingRepository {
    pub fn new(metadata: RepositoryMetadata, graph: Graph) -> Arc<Self> {
        Arc::new(Self {
            metadata: Some(metadata),
            graph,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn named(name: &str, version: &str, graph: Graph) -> Arc<Self> {
        Self::new(RepositoryMetadata::new(name, version), graph)
    }

    pub fn without_metadata(graph: Graph) -> Arc<Self> {
        Arc::new(Self {
            metadata: None,
            graph,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Repository for CountingRepository {
    fn metadata(&self) -> Option<&RepositoryMetadata> {
        self.metadata.as_ref()
    }

    fn get_graph(&self, ctx: &FetchContext) -> anyhow::Result<Graph> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ctx.cancel.check()?;
        Ok(self.graph.clone())
    }
}

/// Provider whose fetch always fails.
pub struct FailingRepository {
    metadata: RepositoryMetadata,
}

impl FailingRepository {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            metadata: RepositoryMetadata::new(name, "0.0.0"),
        })
    }
}

impl Repository for FailingRepository {
    fn metadata(&self) -> Option<&RepositoryMetadata> {
        Some(&self.metadata)
    }

    fn get_graph(&self, _ctx: &FetchContext) -> anyhow::Result<Graph> {
        anyhow::bail!("upstream store is offline")
    }
}

/// Provider that cancels the shared token while fetching, then succeeds.
pub struct CancellingRepository {
    metadata: RepositoryMetadata,
}

impl CancellingRepository {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            metadata: RepositoryMetadata::new(name, "0.0.0"),
        })
    }
}

impl Repository for CancellingRepository {
    fn metadata(&self) -> Option<&RepositoryMetadata> {
        Some(&self.metadata)
    }

    fn get_graph(&self, ctx: &FetchContext) -> anyhow::Result<Graph> {
        ctx.cancel.cancel();
        Ok(single_node_graph("APP"))
    }
}

/// Upcast for the builder.
pub fn dyn_repos<R: Repository + 'static>(repos: &[Arc<R>]) -> Vec<Arc<dyn Repository>> {
    repos
        .iter()
        .map(|repo| repo.clone() as Arc<dyn Repository>)
        .collect()
}

/// Exporter whose write always fails with an I/O error.
pub struct FailingExporter {
    pub name: &'static str,
    pub requirement: Requirement,
}

impl Exporter for FailingExporter {
    fn name(&self) -> &str {
        self.name
    }

    fn file_name(&self, repo_name: &str) -> String {
        format!("{}.{}", repo_name, self.name)
    }

    fn requirement(&self) -> Requirement {
        self.requirement
    }

    fn write(&self, _graph: &Graph, out: &mut dyn Write) -> Result<(), ExportError> {
        out.write_all(b"partial")?;
        Err(ExportError::Io(std::io::Error::other("disk full")))
    }
}

/// Optional exporter whose capability is missing.
pub struct MissingExporter;

impl Exporter for MissingExporter {
    fn name(&self) -> &str {
        "missing"
    }

    fn file_name(&self, repo_name: &str) -> String {
        format!("{}.missing", repo_name)
    }

    fn requirement(&self) -> Requirement {
        Requirement::Optional
    }

    fn is_available(&self) -> bool {
        false
    }

    fn write(&self, _graph: &Graph, _out: &mut dyn Write) -> Result<(), ExportError> {
        Err(ExportError::Unavailable("not installed".to_string()))
    }
}

/// Optional exporter that cancels a shared token while writing.
pub struct InterruptingExporter {
    pub cancel: CancellationToken,
}

impl Exporter for InterruptingExporter {
    fn name(&self) -> &str {
        "interrupt"
    }

    fn file_name(&self, repo_name: &str) -> String {
        format!("{}.interrupt", repo_name)
    }

    fn requirement(&self) -> Requirement {
        Requirement::Optional
    }

    fn write(&self, _graph: &Graph, out: &mut dyn Write) -> Result<(), ExportError> {
        self.cancel.cancel();
        out.write_all(b"done")?;
        Ok(())
    }
}

/// Paths of the four mandatory export files.
pub fn mandatory_files(directory: &Path, name: &str) -> Vec<PathBuf> {
    ["nodelink.json", "sif", "gmt", "graphml"]
        .iter()
        .map(|suffix| directory.join(format!("{}.{}", name, suffix)))
        .collect()
}
