//! Network-exchange (CX) JSON export

use std::collections::HashMap;
use std::io::Write;

use serde_json::{Value, json};

use crate::error::FormatError;
use crate::graph::Graph;

pub fn to_cx<W: Write>(graph: &Graph, mut writer: W) -> Result<(), FormatError> {
    let mut position = HashMap::new();
    let mut nodes = Vec::new();
    let mut node_attributes = Vec::new();
    for (pos, node) in graph.all_nodes().enumerate() {
        position.insert(node.id, pos);
        nodes.push(json!({
            "@id": pos,
            "n": node.to_string(),
            "r": format!("{}:{}", node.namespace, node.name),
        }));
        node_attributes.push(json!({"po": pos, "n": "function", "v": node.kind.function()}));
        node_attributes.push(json!({"po": pos, "n": "namespace", "v": node.namespace}));
        node_attributes.push(json!({"po": pos, "n": "name", "v": node.name}));
    }

    let mut edges = Vec::new();
    let mut edge_attributes = Vec::new();
    for (pos, edge) in graph.all_edges().enumerate() {
        let (Some(source), Some(target)) = (position.get(&edge.source), position.get(&edge.target))
        else {
            continue;
        };
        edges.push(json!({"@id": pos, "s": source, "t": target, "i": edge.relation.as_str()}));
        if let Some(citation) = &edge.citation {
            edge_attributes.push(json!({
                "po": pos,
                "n": "citation",
                "v": format!("{}:{}", citation.db, citation.reference),
            }));
        }
        if let Some(evidence) = &edge.evidence {
            edge_attributes.push(json!({"po": pos, "n": "evidence", "v": evidence}));
        }
    }

    let metadata = graph.metadata();
    let network_attributes: Vec<Value> = [
        ("name", &metadata.name),
        ("version", &metadata.version),
        ("author", &metadata.authors),
        ("description", &metadata.description),
    ]
    .into_iter()
    .filter_map(|(n, v)| v.as_ref().map(|v| json!({"n": n, "v": v})))
    .collect();

    let cx = json!([
        {"numberVerification": [{"longNumber": 281474976710655u64}]},
        {"networkAttributes": network_attributes},
        {"nodes": nodes},
        {"nodeAttributes": node_attributes},
        {"edges": edges},
        {"edgeAttributes": edge_attributes},
        {"status": [{"error": "", "success": true}]},
    ]);
    serde_json::to_writer(&mut writer, &cx)?;
    writer.flush()?;
    Ok(())
}
