//! Integration tests for TauBase
//!
//! These tests drive the whole path: config file, providers reading source
//! files, the orchestrator, and the artifacts it leaves on disk.

use std::fs::{self, File};
use std::path::Path;
use std::process::Command;

use taubase_core::io::{from_nodelink, to_nodelink};
use taubase_core::{Citation, Graph, GraphEdge, GraphNode, NodeKind, Relation, load_graph, save_graph};
use taubase_repo::{CancellationToken, Config, GraphRequest, GraphService, RepoError};
use tempfile::TempDir;

fn amyloid_graph() -> Graph {
    let mut graph = Graph::new();
    let app = graph.add_node(GraphNode::protein("HGNC", "APP"));
    let bace1 = graph.add_node(GraphNode::protein("HGNC", "BACE1"));
    let abeta = graph.add_node(GraphNode::new(NodeKind::Abundance, "CHEBI", "amyloid-beta"));
    graph
        .add_edge(
            GraphEdge::new(bace1, app, Relation::Decreases).with_citation(Citation::pubmed("30000001")),
        )
        .unwrap();
    graph
        .add_edge(
            GraphEdge::new(app, abeta, Relation::Increases).with_citation(Citation::pubmed("30000002")),
        )
        .unwrap();
    graph
}

fn tau_graph() -> Graph {
    let mut graph = Graph::new();
    let gsk3b = graph.add_node(GraphNode::protein("HGNC", "GSK3B"));
    let mapt = graph.add_node(GraphNode::protein("HGNC", "MAPT"));
    let app = graph.add_node(GraphNode::protein("HGNC", "APP"));
    graph
        .add_edge(
            GraphEdge::new(gsk3b, mapt, Relation::DirectlyIncreases)
                .with_citation(Citation::pubmed("30000003")),
        )
        .unwrap();
    graph
        .add_edge(GraphEdge::new(app, gsk3b, Relation::Increases).with_citation(Citation::pubmed("30000004")))
        .unwrap();
    graph
}

/// Lay out a project: two sources, an output directory and a config file.
fn project(disabled: &[&str]) -> TempDir {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("sources")).unwrap();
    fs::create_dir(root.path().join("data")).unwrap();

    to_nodelink(
        &amyloid_graph(),
        File::create(root.path().join("sources/amyloid.nodelink.json")).unwrap(),
    )
    .unwrap();
    save_graph(&tau_graph(), &root.path().join("sources/tau.graph.cache")).unwrap();

    let disabled = disabled
        .iter()
        .map(|name| format!("\"{}\"", name))
        .collect::<Vec<_>>()
        .join(", ");
    let config = format!(
        r#"name = "taubase"
version = "0.1.0"
directory = "data"

[export]
disabled = [{disabled}]

[[repositories]]
name = "amyloid"
version = "1.2.0"
authors = "Alice, Bob"
path = "sources/amyloid.nodelink.json"

[[repositories]]
name = "tau"
version = "0.4.0"
authors = "Bob, Carol"
path = "sources/tau.graph.cache"
"#
    );
    fs::write(root.path().join("taubase.toml"), config).unwrap();
    root
}

fn data(root: &TempDir) -> std::path::PathBuf {
    root.path().join("data")
}

fn assert_mandatory_exports(directory: &Path) {
    for file in [
        "taubase.graph.cache",
        "taubase.nodelink.json",
        "taubase.sif",
        "taubase.gmt",
        "taubase.graphml",
    ] {
        assert!(directory.join(file).exists(), "missing {}", file);
    }
}

#[test]
fn test_config_to_artifacts() {
    let root = project(&[]);
    let repo = Config::load(&root.path().join("taubase.toml"))
        .unwrap()
        .into_repo()
        .unwrap();

    let graph = repo
        .get_graph(&GraphRequest::cached(), &CancellationToken::new())
        .unwrap();

    // APP is shared between the two sources
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.metadata().version.as_deref(), Some("1.2.0/0.4.0"));
    assert_eq!(graph.metadata().authors.as_deref(), Some("Alice, Bob, Carol"));
    assert_eq!(
        graph.metadata().description.as_deref(),
        Some("A distributed repository (release 0.1.0) of several repositories: amyloid v1.2.0, tau v0.4.0")
    );

    assert_mandatory_exports(&data(&root));
    assert!(data(&root).join("taubase.statements.cache").exists());
    assert!(data(&root).join("taubase.cx.json").exists());
    assert!(data(&root).join("index.html").exists());

    let artifact = load_graph(&data(&root).join("taubase.graph.cache")).unwrap();
    assert_eq!(artifact, graph);

    let nodelink = from_nodelink(File::open(data(&root).join("taubase.nodelink.json")).unwrap()).unwrap();
    assert_eq!(nodelink.node_count(), 5);
    assert_eq!(nodelink.metadata().name.as_deref(), Some("taubase"));

    let sif = fs::read_to_string(data(&root).join("taubase.sif")).unwrap();
    assert_eq!(sif.lines().count(), 4);
    assert!(sif.contains("p(HGNC:GSK3B)\tdirectlyIncreases\tp(HGNC:MAPT)"));
}

#[test]
fn test_second_run_is_a_cache_hit() {
    let root = project(&[]);
    let config = Config::load(&root.path().join("taubase.toml")).unwrap();
    let first = config.clone().into_repo().unwrap().get_graph_in(None, true).unwrap();

    // Removing a source proves the second run never touches the providers
    fs::remove_file(root.path().join("sources/amyloid.nodelink.json")).unwrap();
    let repo = config.into_repo().unwrap();
    let second = repo.get_graph_in(None, true).unwrap();
    assert_eq!(first, second);

    let err = repo.get_graph_in(None, false).unwrap_err();
    match err {
        RepoError::Provider { name, .. } => assert_eq!(name, "amyloid"),
        other => panic!("expected a provider error, got {:?}", other),
    }
}

#[test]
fn test_disabled_exporters_are_skipped() {
    let root = project(&["html", "cx"]);
    let repo = Config::load(&root.path().join("taubase.toml"))
        .unwrap()
        .into_repo()
        .unwrap();

    repo.get_graph_in(None, false).unwrap();

    assert_mandatory_exports(&data(&root));
    assert!(!data(&root).join("index.html").exists());
    assert!(!data(&root).join("taubase.cx.json").exists());
    assert!(data(&root).join("taubase.statements.cache").exists());
}

#[test]
fn test_directory_override() {
    let root = project(&[]);
    let elsewhere = TempDir::new().unwrap();
    let repo = Config::load(&root.path().join("taubase.toml"))
        .unwrap()
        .into_repo()
        .unwrap();

    repo.get_graph_in(Some(elsewhere.path()), true).unwrap();

    assert_mandatory_exports(elsewhere.path());
    assert_eq!(fs::read_dir(data(&root)).unwrap().count(), 0);
}

#[tokio::test]
async fn test_service_on_blocking_pool() {
    let root = project(&[]);
    let repo = Config::load(&root.path().join("taubase.toml"))
        .unwrap()
        .into_repo()
        .unwrap();

    let service = tokio::task::spawn_blocking(move || {
        GraphService::start(repo, None, &CancellationToken::new())
    })
    .await
    .unwrap()
    .unwrap();

    let summary = service.summary();
    assert_eq!(summary.name.as_deref(), Some("taubase"));
    assert_eq!(summary.nodes, 5);
    assert_eq!(summary.edges, 4);
}

#[test]
fn test_cli_build_and_clear() {
    let root = project(&[]);
    let config = root.path().join("taubase.toml");
    let bin = env!("CARGO_BIN_EXE_taubase");

    let build = Command::new(bin)
        .arg("--config")
        .arg(&config)
        .args(["build", "--sequential"])
        .output()
        .expect("Failed to run taubase");
    assert!(build.status.success(), "{}", String::from_utf8_lossy(&build.stderr));
    let stdout = String::from_utf8_lossy(&build.stdout);
    assert!(stdout.contains("taubase.graph.cache"));
    assert_mandatory_exports(&data(&root));

    let summary = Command::new(bin)
        .arg("--config")
        .arg(&config)
        .arg("summary")
        .output()
        .expect("Failed to run taubase");
    assert!(summary.status.success());
    assert!(String::from_utf8_lossy(&summary.stdout).contains("\"nodes\": 5"));

    let clear = Command::new(bin)
        .arg("--config")
        .arg(&config)
        .arg("clear")
        .output()
        .expect("Failed to run taubase");
    assert!(clear.status.success());
    // Only the shared HTML report survives
    let left: Vec<_> = fs::read_dir(data(&root))
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(left, ["index.html"]);
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_taubase"))
        .arg("version")
        .output()
        .expect("Failed to run taubase");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("TauBase v"));
}
