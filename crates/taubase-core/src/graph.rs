//! Graph wrapper using petgraph::StableDiGraph keyed by content-derived ids

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GraphError;
use crate::model::*;

/// The knowledge graph: a directed multigraph whose nodes and edges are
/// deduplicated by identity.
#[derive(Clone)]
pub struct Graph {
    inner: StableDiGraph<GraphNode, GraphEdge>,
    nodes: HashMap<NodeId, NodeIndex>,
    edges: HashMap<EdgeId, EdgeIndex>,
    metadata: GraphMetadata,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("name", &self.metadata.name)
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            inner: StableDiGraph::new(),
            nodes: HashMap::new(),
            edges: HashMap::new(),
            metadata: GraphMetadata::default(),
        }
    }

    pub fn with_metadata(metadata: GraphMetadata) -> Self {
        Graph {
            metadata,
            ..Graph::new()
        }
    }

    pub fn metadata(&self) -> &GraphMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut GraphMetadata {
        &mut self.metadata
    }

    pub fn set_metadata(&mut self, metadata: GraphMetadata) {
        self.metadata = metadata;
    }

    /// Add a node. A node whose id is already present is not added again;
    /// the existing id is returned either way.
    pub fn add_node(&mut self, node: GraphNode) -> NodeId {
        let id = node.id;
        if !self.nodes.contains_key(&id) {
            let idx = self.inner.add_node(node);
            self.nodes.insert(id, idx);
        }
        id
    }

    /// Add an edge. Returns `Ok(false)` when an identical edge already exists.
    pub fn add_edge(&mut self, edge: GraphEdge) -> Result<bool, GraphError> {
        let source = self.index_of(edge.source)?;
        let target = self.index_of(edge.target)?;
        Ok(self.insert_edge(source, target, edge))
    }

    fn index_of(&self, id: NodeId) -> Result<NodeIndex, GraphError> {
        self.nodes.get(&id).copied().ok_or(GraphError::MissingNode(id))
    }

    fn insert_edge(&mut self, source: NodeIndex, target: NodeIndex, edge: GraphEdge) -> bool {
        if self.edges.contains_key(&edge.id) {
            return false;
        }
        let id = edge.id;
        let idx = self.inner.add_edge(source, target, edge);
        self.edges.insert(id, idx);
        true
    }

    /// Copy every node and every edge of `other` that is not yet present.
    pub fn merge(&mut self, other: &Graph) {
        for node in other.all_nodes() {
            self.add_node(node.clone());
        }
        for edge in other.all_edges() {
            // Every endpoint of `other` was inserted above.
            if let (Some(&source), Some(&target)) =
                (self.nodes.get(&edge.source), self.nodes.get(&edge.target))
            {
                self.insert_edge(source, target, edge.clone());
            }
        }
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes
            .get(&id)
            .and_then(|&idx| self.inner.node_weight(idx))
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Get an edge by ID.
    pub fn edge(&self, id: EdgeId) -> Option<&GraphEdge> {
        self.edges
            .get(&id)
            .and_then(|&idx| self.inner.edge_weight(idx))
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Iterate over all nodes in insertion order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Iterate over all edges in insertion order.
    pub fn all_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// Get all outgoing edges from a node.
    pub fn edges_from(&self, source: NodeId) -> impl Iterator<Item = &GraphEdge> {
        self.directed(source, Direction::Outgoing)
    }

    /// Get all incoming edges to a node.
    pub fn edges_to(&self, target: NodeId) -> impl Iterator<Item = &GraphEdge> {
        self.directed(target, Direction::Incoming)
    }

    fn directed(&self, id: NodeId, direction: Direction) -> impl Iterator<Item = &GraphEdge> {
        self.nodes
            .get(&id)
            .into_iter()
            .flat_map(move |&idx| self.inner.edges_directed(idx, direction))
            .map(|edge_ref| edge_ref.weight())
    }

    /// In-degree plus out-degree.
    pub fn degree(&self, id: NodeId) -> usize {
        self.edges_from(id).count() + self.edges_to(id).count()
    }

    /// Check if an edge with the given relation exists between two nodes.
    pub fn has_edge_between(&self, source: NodeId, target: NodeId, relation: Relation) -> bool {
        self.edges_from(source)
            .any(|e| e.target == target && e.relation == relation)
    }

    /// Find the variant-free node with the given namespace and name.
    pub fn find_node(&self, kind: NodeKind, namespace: &str, name: &str) -> Option<&GraphNode> {
        self.node(NodeId::new(kind, namespace, name, &[]))
    }

    /// Get all nodes of a specific kind.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.all_nodes().filter(move |n| n.kind == kind)
    }

    /// Remove a node and all its edges.
    pub fn remove_node(&mut self, id: NodeId) -> Option<GraphNode> {
        let idx = self.nodes.remove(&id)?;
        let incident: Vec<EdgeId> = self
            .inner
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.inner.edges_directed(idx, Direction::Incoming))
            .map(|edge_ref| edge_ref.weight().id)
            .collect();
        for edge_id in incident {
            self.edges.remove(&edge_id);
        }
        self.inner.remove_node(idx)
    }

    /// Remove an edge by ID.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<GraphEdge> {
        let idx = self.edges.remove(&id)?;
        self.inner.remove_edge(idx)
    }

    /// Raw access for algorithms that work on petgraph directly.
    pub(crate) fn inner(&self) -> &StableDiGraph<GraphNode, GraphEdge> {
        &self.inner
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.metadata == other.metadata
            && self.all_nodes().eq(other.all_nodes())
            && self.all_edges().eq(other.all_edges())
    }
}

/// Flat, order-preserving form used by the serde-based formats.
#[derive(Serialize)]
struct GraphDataRef<'a> {
    metadata: &'a GraphMetadata,
    nodes: Vec<&'a GraphNode>,
    edges: Vec<&'a GraphEdge>,
}

#[derive(Deserialize)]
struct GraphData {
    metadata: GraphMetadata,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GraphDataRef {
            metadata: &self.metadata,
            nodes: self.all_nodes().collect(),
            edges: self.all_edges().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Graph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = GraphData::deserialize(deserializer)?;
        let mut graph = Graph::with_metadata(data.metadata);

        // Stored ids came from whichever build wrote them; recompute with ours.
        let mut remap = HashMap::with_capacity(data.nodes.len());
        for mut node in data.nodes {
            let stored = node.id;
            node.id = node.compute_id();
            remap.insert(stored, graph.add_node(node));
        }
        for mut edge in data.edges {
            let endpoint = |id: NodeId| {
                remap.get(&id).copied().ok_or_else(|| {
                    <D::Error as serde::de::Error>::custom(GraphError::MissingNode(id))
                })
            };
            edge.source = endpoint(edge.source)?;
            edge.target = endpoint(edge.target)?;
            edge.id = edge.compute_id();
            graph.add_edge(edge).map_err(serde::de::Error::custom)?;
        }
        Ok(graph)
    }
}
