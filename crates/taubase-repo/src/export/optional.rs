//! Optional exporters; availability follows the crate features

use std::io::Write;

use taubase_core::Graph;

use super::{ExportError, Exporter, Requirement};

/// Causal statements extracted from the graph, bincode-encoded.
pub struct StatementsExporter;

impl Exporter for StatementsExporter {
    fn name(&self) -> &str {
        "statements"
    }

    fn file_name(&self, repo_name: &str) -> String {
        format!("{}.statements.cache", repo_name)
    }

    fn requirement(&self) -> Requirement {
        Requirement::Optional
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "statements")
    }

    #[cfg(feature = "statements")]
    fn write(&self, graph: &Graph, out: &mut dyn Write) -> Result<(), ExportError> {
        use taubase_core::io::statements::{to_statements, write_statements};
        Ok(write_statements(&to_statements(graph), out)?)
    }

    #[cfg(not(feature = "statements"))]
    fn write(&self, _graph: &Graph, _out: &mut dyn Write) -> Result<(), ExportError> {
        Err(ExportError::Unavailable("built without the statements feature".to_string()))
    }
}

/// CX network exchange JSON.
pub struct CxExporter;

impl Exporter for CxExporter {
    fn name(&self) -> &str {
        "cx"
    }

    fn file_name(&self, repo_name: &str) -> String {
        format!("{}.cx.json", repo_name)
    }

    fn requirement(&self) -> Requirement {
        Requirement::Optional
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "cx")
    }

    #[cfg(feature = "cx")]
    fn write(&self, graph: &Graph, out: &mut dyn Write) -> Result<(), ExportError> {
        Ok(taubase_core::io::cx::to_cx(graph, out)?)
    }

    #[cfg(not(feature = "cx"))]
    fn write(&self, _graph: &Graph, _out: &mut dyn Write) -> Result<(), ExportError> {
        Err(ExportError::Unavailable("built without the cx feature".to_string()))
    }
}

/// Static HTML report. Always written as `index.html`.
///
/// The file is shared by every aggregate exporting to the same directory and
/// is not covered by the per-repository lock; the last build wins. It is
/// never removed by `DistributedRepo::clear`.
pub struct HtmlExporter;

impl Exporter for HtmlExporter {
    fn name(&self) -> &str {
        "html"
    }

    fn file_name(&self, _repo_name: &str) -> String {
        "index.html".to_string()
    }

    fn is_shared(&self) -> bool {
        true
    }

    fn requirement(&self) -> Requirement {
        Requirement::Optional
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "html")
    }

    #[cfg(feature = "html")]
    fn write(&self, graph: &Graph, out: &mut dyn Write) -> Result<(), ExportError> {
        Ok(taubase_core::io::html::to_html(graph, out)?)
    }

    #[cfg(not(feature = "html"))]
    fn write(&self, _graph: &Graph, _out: &mut dyn Write) -> Result<(), ExportError> {
        Err(ExportError::Unavailable("built without the html feature".to_string()))
    }
}
