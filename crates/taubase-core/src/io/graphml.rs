//! GraphML export

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::FormatError;
use crate::graph::Graph;

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";

/// `(id, domain)` of every attribute key written.
const KEYS: &[(&str, &str)] = &[
    ("function", "node"),
    ("namespace", "node"),
    ("name", "node"),
    ("label", "node"),
    ("relation", "edge"),
    ("citation", "edge"),
    ("evidence", "edge"),
];

pub fn to_graphml<W: Write>(graph: &Graph, writer: W) -> Result<(), FormatError> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);

    emit(&mut xml, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    emit(
        &mut xml,
        Event::Start(BytesStart::new("graphml").with_attributes([("xmlns", GRAPHML_NS)])),
    )?;

    for (id, domain) in KEYS {
        emit(
            &mut xml,
            Event::Empty(BytesStart::new("key").with_attributes([
                ("id", *id),
                ("for", *domain),
                ("attr.name", *id),
                ("attr.type", "string"),
            ])),
        )?;
    }

    let graph_id = graph.metadata().name.clone().unwrap_or_else(|| "G".to_string());
    emit(
        &mut xml,
        Event::Start(BytesStart::new("graph").with_attributes([
            ("id", graph_id.as_str()),
            ("edgedefault", "directed"),
        ])),
    )?;

    for node in graph.all_nodes() {
        let id = super::hex_id(node.id.0);
        emit(
            &mut xml,
            Event::Start(BytesStart::new("node").with_attributes([("id", id.as_str())])),
        )?;
        data(&mut xml, "function", node.kind.function())?;
        data(&mut xml, "namespace", &node.namespace)?;
        data(&mut xml, "name", &node.name)?;
        data(&mut xml, "label", &node.to_string())?;
        emit(&mut xml, Event::End(BytesEnd::new("node")))?;
    }

    for edge in graph.all_edges() {
        let id = super::hex_id(edge.id.0);
        let source = super::hex_id(edge.source.0);
        let target = super::hex_id(edge.target.0);
        emit(
            &mut xml,
            Event::Start(BytesStart::new("edge").with_attributes([
                ("id", id.as_str()),
                ("source", source.as_str()),
                ("target", target.as_str()),
            ])),
        )?;
        data(&mut xml, "relation", edge.relation.as_str())?;
        if let Some(citation) = &edge.citation {
            data(
                &mut xml,
                "citation",
                &format!("{}:{}", citation.db, citation.reference),
            )?;
        }
        if let Some(evidence) = &edge.evidence {
            data(&mut xml, "evidence", evidence)?;
        }
        emit(&mut xml, Event::End(BytesEnd::new("edge")))?;
    }

    emit(&mut xml, Event::End(BytesEnd::new("graph")))?;
    emit(&mut xml, Event::End(BytesEnd::new("graphml")))?;

    let mut inner = xml.into_inner();
    writeln!(inner)?;
    inner.flush()?;
    Ok(())
}

fn data<W: Write>(xml: &mut Writer<W>, key: &str, value: &str) -> io::Result<()> {
    emit(
        xml,
        Event::Start(BytesStart::new("data").with_attributes([("key", key)])),
    )?;
    emit(xml, Event::Text(BytesText::new(value)))?;
    emit(xml, Event::End(BytesEnd::new("data")))
}

fn emit<W: Write>(xml: &mut Writer<W>, event: Event<'_>) -> io::Result<()> {
    xml.write_event(event).map_err(io::Error::other)
}
