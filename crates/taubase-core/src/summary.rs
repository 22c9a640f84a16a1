//! Descriptive statistics over a graph

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::unionfind::UnionFind;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};

use crate::graph::Graph;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub name: Option<String>,
    pub version: Option<String>,
    pub authors: Option<String>,
    pub nodes: usize,
    pub edges: usize,
    /// Distinct citations across all edges.
    pub citations: usize,
    pub namespaces: BTreeMap<String, usize>,
    pub kinds: BTreeMap<String, usize>,
    pub relations: BTreeMap<String, usize>,
    pub density: f64,
    /// Weakly connected components.
    pub components: usize,
    pub average_degree: f64,
}

impl Graph {
    pub fn summary(&self) -> GraphSummary {
        let nodes = self.node_count();
        let edges = self.edge_count();

        let mut namespaces = BTreeMap::new();
        let mut kinds = BTreeMap::new();
        for node in self.all_nodes() {
            *namespaces.entry(node.namespace.clone()).or_insert(0) += 1;
            *kinds.entry(format!("{:?}", node.kind)).or_insert(0) += 1;
        }

        let mut relations = BTreeMap::new();
        let mut citations = BTreeSet::new();
        for edge in self.all_edges() {
            *relations.entry(edge.relation.as_str().to_string()).or_insert(0) += 1;
            if let Some(citation) = &edge.citation {
                citations.insert(citation);
            }
        }

        let density = if nodes < 2 {
            0.0
        } else {
            edges as f64 / (nodes as f64 * (nodes as f64 - 1.0))
        };
        let average_degree = if nodes == 0 {
            0.0
        } else {
            2.0 * edges as f64 / nodes as f64
        };

        GraphSummary {
            name: self.metadata().name.clone(),
            version: self.metadata().version.clone(),
            authors: self.metadata().authors.clone(),
            nodes,
            edges,
            citations: citations.len(),
            namespaces,
            kinds,
            relations,
            density,
            components: self.count_components(),
            average_degree,
        }
    }

    /// Count weakly connected components.
    fn count_components(&self) -> usize {
        let inner = self.inner();
        // Stable indices may have holes; compact them first.
        let position: HashMap<_, _> = inner
            .node_indices()
            .enumerate()
            .map(|(pos, idx)| (idx, pos))
            .collect();

        let mut sets = UnionFind::new(position.len());
        for edge in inner.edge_references() {
            sets.union(position[&edge.source()], position[&edge.target()]);
        }

        let roots: BTreeSet<usize> = (0..position.len()).map(|pos| sets.find(pos)).collect();
        roots.len()
    }
}
