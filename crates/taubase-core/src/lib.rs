//! TauBase Core: knowledge graph model, union, summaries, formats and cache artifacts

pub mod cache;
pub mod error;
pub mod graph;
pub mod io;
pub mod model;
pub mod summary;
pub mod union;


#[cfg(test)]
pub mod test_utils;

pub use cache::{
    GRAPH_CACHE_SUFFIX, StagedArtifact, artifact_path, graph_cache_path, load_graph,
    remove_artifact, resolve_directory, save_graph, should_use_cache, write_atomic,
};
pub use error::{CacheError, FormatError, GraphError};
pub use graph::Graph;
pub use model::{
    Citation, EdgeId, GraphEdge, GraphMetadata, GraphNode, NodeId, NodeKind, Relation,
};
pub use summary::GraphSummary;
pub use union::union;
