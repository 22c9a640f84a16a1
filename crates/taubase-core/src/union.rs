//! Union of several graphs into one

use crate::graph::Graph;

/// Merge graphs into a single new graph.
///
/// Nodes and edges keep the order of their first appearance; duplicates are
/// collapsed by identity. The result carries no metadata.
pub fn union<I>(graphs: I) -> Graph
where
    I: IntoIterator<Item = Graph>,
{
    let mut graphs = graphs.into_iter();
    let Some(mut combined) = graphs.next() else {
        return Graph::new();
    };
    combined.set_metadata(Default::default());

    for graph in graphs {
        combined.merge(&graph);
    }

    tracing::debug!(
        "Union produced {} nodes, {} edges",
        combined.node_count(),
        combined.edge_count()
    );
    combined
}
