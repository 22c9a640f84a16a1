//! Gene set export in GMT layout

use std::collections::BTreeSet;
use std::io::Write;

use crate::error::FormatError;
use crate::graph::Graph;

/// Namespace whose gene products make up the exported gene set.
pub const GENE_NAMESPACE: &str = "HGNC";

/// Write the graph's HGNC gene products as one gene set:
/// `name<TAB>version<TAB>symbol<TAB>symbol...`.
pub fn to_gmt<W: Write>(graph: &Graph, mut writer: W) -> Result<(), FormatError> {
    let genes: BTreeSet<&str> = graph
        .all_nodes()
        .filter(|n| n.kind.is_gene_product() && n.namespace.eq_ignore_ascii_case(GENE_NAMESPACE))
        .map(|n| n.name.as_str())
        .collect();

    let metadata = graph.metadata();
    let name = metadata.name.as_deref().unwrap_or("graph");
    let description = metadata.version.as_deref().unwrap_or("na");

    write!(writer, "{}\t{}", name, description)?;
    for gene in genes {
        write!(writer, "\t{}", gene)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
