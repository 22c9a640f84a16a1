//! Self-contained HTML report of a graph

use std::io::Write;

use quick_xml::escape::escape;

use crate::error::FormatError;
use crate::graph::Graph;

pub fn to_html<W: Write>(graph: &Graph, mut writer: W) -> Result<(), FormatError> {
    let summary = graph.summary();
    let title = summary.name.as_deref().unwrap_or("Knowledge graph");

    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html lang=\"en\">")?;
    writeln!(writer, "<head>")?;
    writeln!(writer, "<meta charset=\"utf-8\">")?;
    writeln!(writer, "<title>{}</title>", escape(title))?;
    writeln!(
        writer,
        "<style>body{{font-family:sans-serif;margin:2em}}table{{border-collapse:collapse}}td,th{{border:1px solid #ccc;padding:4px 8px;text-align:left}}</style>"
    )?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;
    writeln!(writer, "<h1>{}</h1>", escape(title))?;
    if let Some(description) = &graph.metadata().description {
        writeln!(writer, "<p>{}</p>", escape(description.as_str()))?;
    }

    writeln!(writer, "<h2>Summary</h2>")?;
    writeln!(writer, "<table>")?;
    let rows = [
        ("Version", summary.version.clone().unwrap_or_default()),
        ("Authors", summary.authors.clone().unwrap_or_default()),
        ("Nodes", summary.nodes.to_string()),
        ("Edges", summary.edges.to_string()),
        ("Citations", summary.citations.to_string()),
        ("Components", summary.components.to_string()),
        ("Density", format!("{:.4}", summary.density)),
        ("Average degree", format!("{:.2}", summary.average_degree)),
    ];
    for (label, value) in &rows {
        writeln!(
            writer,
            "<tr><th>{}</th><td>{}</td></tr>",
            label,
            escape(value.as_str())
        )?;
    }
    writeln!(writer, "</table>")?;

    writeln!(writer, "<h2>Edges</h2>")?;
    writeln!(writer, "<table>")?;
    writeln!(
        writer,
        "<tr><th>Source</th><th>Relation</th><th>Target</th><th>Citation</th></tr>"
    )?;
    for edge in graph.all_edges() {
        let Some((source, target)) = super::endpoints(graph, edge) else {
            continue;
        };
        let citation = edge
            .citation
            .as_ref()
            .map(|c| format!("{}:{}", c.db, c.reference))
            .unwrap_or_default();
        writeln!(
            writer,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(source.to_string().as_str()),
            edge.relation,
            escape(target.to_string().as_str()),
            escape(citation.as_str())
        )?;
    }
    writeln!(writer, "</table>")?;
    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;
    writer.flush()?;
    Ok(())
}
