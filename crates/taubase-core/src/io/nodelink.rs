//! Node-link JSON: `{directed, multigraph, graph, nodes, links}` with positional node ids

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::graph::Graph;
use crate::model::*;

#[derive(Debug, Serialize, Deserialize)]
struct NodeLinkData {
    #[serde(default = "yes")]
    directed: bool,
    #[serde(default = "yes")]
    multigraph: bool,
    #[serde(default)]
    graph: GraphMetadata,
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    links: Vec<LinkRecord>,
}

fn yes() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    id: usize,
    function: NodeKind,
    namespace: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    variants: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LinkRecord {
    source: usize,
    target: usize,
    /// Edge id; informational, recomputed on read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    relation: Relation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    citation: Option<Citation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    evidence: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    annotations: BTreeMap<String, BTreeSet<String>>,
}

pub fn to_nodelink<W: Write>(graph: &Graph, mut writer: W) -> Result<(), FormatError> {
    let mut position = HashMap::new();
    let mut nodes = Vec::with_capacity(graph.node_count());
    for (pos, node) in graph.all_nodes().enumerate() {
        position.insert(node.id, pos);
        nodes.push(NodeRecord {
            id: pos,
            function: node.kind,
            namespace: node.namespace.clone(),
            name: node.name.clone(),
            identifier: node.identifier.clone(),
            variants: node.variants.clone(),
        });
    }

    let links = graph
        .all_edges()
        .filter_map(|edge| {
            Some(LinkRecord {
                source: *position.get(&edge.source)?,
                target: *position.get(&edge.target)?,
                key: Some(super::hex_id(edge.id.0)),
                relation: edge.relation,
                citation: edge.citation.clone(),
                evidence: edge.evidence.clone(),
                annotations: edge.annotations.clone(),
            })
        })
        .collect();

    let data = NodeLinkData {
        directed: true,
        multigraph: true,
        graph: graph.metadata().clone(),
        nodes,
        links,
    };
    serde_json::to_writer_pretty(&mut writer, &data)?;
    writer.flush()?;
    Ok(())
}

/// Read node-link JSON. Node and edge ids are recomputed from content.
pub fn from_nodelink<R: Read>(reader: R) -> Result<Graph, FormatError> {
    let data: NodeLinkData = serde_json::from_reader(reader)?;
    if !data.directed {
        return Err(FormatError::CorruptArtifact(
            "undirected node-link data is not supported".to_string(),
        ));
    }

    let mut graph = Graph::with_metadata(data.graph);
    let mut ids = HashMap::with_capacity(data.nodes.len());
    for record in data.nodes {
        let mut node = GraphNode::new(record.function, record.namespace, record.name);
        node.identifier = record.identifier;
        node.variants = record.variants;
        node.id = node.compute_id();
        ids.insert(record.id, graph.add_node(node));
    }

    for link in data.links {
        let lookup = |pos: usize| {
            ids.get(&pos).copied().ok_or_else(|| {
                FormatError::CorruptArtifact(format!("link references unknown node {}", pos))
            })
        };
        let mut edge = GraphEdge::new(lookup(link.source)?, lookup(link.target)?, link.relation);
        edge.citation = link.citation;
        edge.evidence = link.evidence;
        edge.annotations = link.annotations;
        edge.id = edge.compute_id();
        graph.add_edge(edge)?;
    }

    Ok(graph)
}
