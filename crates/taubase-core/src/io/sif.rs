//! Simple interaction format: one tab-delimited `source relation target` line per edge

use std::io::Write;

use crate::error::FormatError;
use crate::graph::Graph;

pub fn to_sif<W: Write>(graph: &Graph, mut writer: W) -> Result<(), FormatError> {
    for edge in graph.all_edges() {
        let Some((source, target)) = super::endpoints(graph, edge) else {
            continue;
        };
        writeln!(writer, "{}\t{}\t{}", source, edge.relation, target)?;
    }
    writer.flush()?;
    Ok(())
}
