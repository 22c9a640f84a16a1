//! Reasoning-engine statements extracted from causal edges

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::graph::Graph;
use crate::model::{Citation, GraphNode, NodeKind, Relation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementKind {
    Activation,
    Inhibition,
    Regulation,
}

/// A grounded participant of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub namespace: String,
    pub name: String,
    pub modifications: Vec<String>,
}

impl From<&GraphNode> for Agent {
    fn from(node: &GraphNode) -> Self {
        Agent {
            namespace: node.namespace.clone(),
            name: node.name.clone(),
            modifications: node.variants.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub subject: Agent,
    pub object: Agent,
    pub direct: bool,
    pub citation: Option<Citation>,
    pub evidence: Option<String>,
}

/// Convert every causal edge between agent-like nodes into a statement.
/// Edges into phenotypes (processes, pathologies) have no statement form.
pub fn to_statements(graph: &Graph) -> Vec<Statement> {
    graph
        .all_edges()
        .filter_map(|edge| {
            let kind = match edge.relation {
                Relation::Increases | Relation::DirectlyIncreases => StatementKind::Activation,
                Relation::Decreases | Relation::DirectlyDecreases => StatementKind::Inhibition,
                Relation::Regulates => StatementKind::Regulation,
                _ => return None,
            };
            let (subject, object) = super::endpoints(graph, edge)?;
            if !is_agent(subject) || !is_agent(object) {
                return None;
            }
            Some(Statement {
                kind,
                subject: subject.into(),
                object: object.into(),
                direct: edge.relation.is_direct(),
                citation: edge.citation.clone(),
                evidence: edge.evidence.clone(),
            })
        })
        .collect()
}

fn is_agent(node: &GraphNode) -> bool {
    !matches!(node.kind, NodeKind::BiologicalProcess | NodeKind::Pathology)
}

pub fn write_statements<W: Write>(statements: &[Statement], mut writer: W) -> Result<(), FormatError> {
    bincode::serialize_into(&mut writer, statements)?;
    writer.flush()?;
    Ok(())
}

pub fn read_statements<R: Read>(reader: R) -> Result<Vec<Statement>, FormatError> {
    Ok(bincode::deserialize_from(reader)?)
}
