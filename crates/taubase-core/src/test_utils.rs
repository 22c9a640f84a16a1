//! Test utilities for TauBase core

use crate::graph::Graph;
use crate::model::*;

/// GSK3B phosphorylates MAPT; MAPT is associated with Alzheimer's disease.
pub fn tau_graph() -> Graph {
    let mut graph = Graph::new();
    let gsk3b = graph.add_node(GraphNode::protein("HGNC", "GSK3B"));
    let mapt = graph.add_node(GraphNode::protein("HGNC", "MAPT"));
    let phospho = graph.add_node(
        GraphNode::protein("HGNC", "MAPT").with_variant("pmod(Ph, Ser, 202)"),
    );
    let ad = graph.add_node(GraphNode::new(
        NodeKind::Pathology,
        "MESH",
        "Alzheimer Disease",
    ));

    graph
        .add_edge(
            GraphEdge::new(gsk3b, phospho, Relation::DirectlyIncreases)
                .with_citation(Citation::pubmed("10000001"))
                .with_evidence("GSK3B phosphorylates tau at Ser202"),
        )
        .unwrap();
    graph
        .add_edge(GraphEdge::new(mapt, phospho, Relation::HasVariant))
        .unwrap();
    graph
        .add_edge(
            GraphEdge::new(phospho, ad, Relation::PositiveCorrelation)
                .with_citation(Citation::pubmed("10000002")),
        )
        .unwrap();
    graph
}

/// A second source that overlaps with [`tau_graph`] on the GSK3B -> pMAPT edge.
pub fn kinase_graph() -> Graph {
    let mut graph = Graph::new();
    let gsk3b = graph.add_node(GraphNode::protein("HGNC", "GSK3B"));
    let cdk5 = graph.add_node(GraphNode::protein("HGNC", "CDK5"));
    let phospho = graph.add_node(
        GraphNode::protein("HGNC", "MAPT").with_variant("pmod(Ph, Ser, 202)"),
    );

    graph
        .add_edge(
            GraphEdge::new(gsk3b, phospho, Relation::DirectlyIncreases)
                .with_citation(Citation::pubmed("10000001"))
                .with_evidence("GSK3B phosphorylates tau at Ser202"),
        )
        .unwrap();
    graph
        .add_edge(
            GraphEdge::new(cdk5, phospho, Relation::Increases)
                .with_citation(Citation::pubmed("10000003")),
        )
        .unwrap();
    graph
}

/// A graph with a single edge between two proteins of the given names.
pub fn pair_graph(source: &str, target: &str) -> Graph {
    let mut graph = Graph::new();
    let s = graph.add_node(GraphNode::protein("HGNC", source));
    let t = graph.add_node(GraphNode::protein("HGNC", target));
    graph
        .add_edge(GraphEdge::new(s, t, Relation::Increases))
        .unwrap();
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shapes() {
        let tau = tau_graph();
        assert_eq!(tau.node_count(), 4);
        assert_eq!(tau.edge_count(), 3);

        let kinase = kinase_graph();
        assert_eq!(kinase.node_count(), 3);
        assert_eq!(kinase.edge_count(), 2);
    }
}
