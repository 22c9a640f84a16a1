//! Canonical binary form of a graph, used as the cache artifact

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::graph::Graph;

const MAGIC: &str = "taubase-graph";
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Header {
    magic: String,
    format_version: u32,
    created_at: String,
}

/// Write `graph` behind a versioned header.
pub fn to_binary<W: Write>(graph: &Graph, mut writer: W) -> Result<(), FormatError> {
    let header = Header {
        magic: MAGIC.to_string(),
        format_version: FORMAT_VERSION,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    bincode::serialize_into(&mut writer, &header)?;
    bincode::serialize_into(&mut writer, graph)?;
    writer.flush()?;
    Ok(())
}

/// Read a graph written by [`to_binary`].
pub fn from_binary<R: Read>(mut reader: R) -> Result<Graph, FormatError> {
    let header: Header = bincode::deserialize_from(&mut reader)
        .map_err(|e| FormatError::CorruptArtifact(format!("unreadable header: {}", e)))?;
    if header.magic != MAGIC {
        return Err(FormatError::CorruptArtifact(format!(
            "unexpected magic {:?}",
            header.magic
        )));
    }
    if header.format_version != FORMAT_VERSION {
        return Err(FormatError::CorruptArtifact(format!(
            "format version {} is not supported (expected {})",
            header.format_version, FORMAT_VERSION
        )));
    }

    let graph: Graph = bincode::deserialize_from(&mut reader)?;
    tracing::debug!(
        "Loaded binary graph written at {} ({} nodes, {} edges)",
        header.created_at,
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
