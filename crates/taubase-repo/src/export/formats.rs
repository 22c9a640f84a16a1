//! The four mandatory text formats

use std::io::Write;

use taubase_core::Graph;
use taubase_core::io::{to_gmt, to_graphml, to_nodelink, to_sif};

use super::{ExportError, Exporter, Requirement};

pub struct NodeLinkExporter;

impl Exporter for NodeLinkExporter {
    fn name(&self) -> &str {
        "nodelink"
    }

    fn file_name(&self, repo_name: &str) -> String {
        format!("{}.nodelink.json", repo_name)
    }

    fn requirement(&self) -> Requirement {
        Requirement::Mandatory
    }

    fn write(&self, graph: &Graph, out: &mut dyn Write) -> Result<(), ExportError> {
        Ok(to_nodelink(graph, out)?)
    }
}

pub struct SifExporter;

impl Exporter for SifExporter {
    fn name(&self) -> &str {
        "sif"
    }

    fn file_name(&self, repo_name: &str) -> String {
        format!("{}.sif", repo_name)
    }

    fn requirement(&self) -> Requirement {
        Requirement::Mandatory
    }

    fn write(&self, graph: &Graph, out: &mut dyn Write) -> Result<(), ExportError> {
        Ok(to_sif(graph, out)?)
    }
}

pub struct GmtExporter;

impl Exporter for GmtExporter {
    fn name(&self) -> &str {
        "gmt"
    }

    fn file_name(&self, repo_name: &str) -> String {
        format!("{}.gmt", repo_name)
    }

    fn requirement(&self) -> Requirement {
        Requirement::Mandatory
    }

    fn write(&self, graph: &Graph, out: &mut dyn Write) -> Result<(), ExportError> {
        Ok(to_gmt(graph, out)?)
    }
}

pub struct GraphMlExporter;

impl Exporter for GraphMlExporter {
    fn name(&self) -> &str {
        "graphml"
    }

    fn file_name(&self, repo_name: &str) -> String {
        format!("{}.graphml", repo_name)
    }

    fn requirement(&self) -> Requirement {
        Requirement::Mandatory
    }

    fn write(&self, graph: &Graph, out: &mut dyn Write) -> Result<(), ExportError> {
        Ok(to_graphml(graph, out)?)
    }
}
