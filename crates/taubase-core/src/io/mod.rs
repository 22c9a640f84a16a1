//! On-disk formats for the knowledge graph
//!
//! Every writer takes any `std::io::Write` so callers decide whether output
//! goes to a file, a temp file or memory. Optional formats are compiled in
//! through cargo features of the same name.

pub mod binary;
pub mod gmt;
pub mod graphml;
pub mod nodelink;
pub mod sif;

#[cfg(feature = "cx")]
pub mod cx;
#[cfg(feature = "html")]
pub mod html;
#[cfg(feature = "statements")]
pub mod statements;

pub use binary::{from_binary, to_binary};
pub use gmt::to_gmt;
pub use graphml::to_graphml;
pub use nodelink::{from_nodelink, to_nodelink};
pub use sif::to_sif;

use crate::graph::Graph;
use crate::model::{GraphEdge, GraphNode};

/// Resolve both endpoints of an edge, skipping edges whose nodes are gone.
pub(crate) fn endpoints<'a>(
    graph: &'a Graph,
    edge: &GraphEdge,
) -> Option<(&'a GraphNode, &'a GraphNode)> {
    Some((graph.node(edge.source)?, graph.node(edge.target)?))
}

/// Hex form of a node or edge id, used where formats need string keys.
pub(crate) fn hex_id(id: u64) -> String {
    format!("{:016x}", id)
}
