//! Per-repository metadata and the combined metadata of an aggregate

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use taubase_core::{Graph, GraphMetadata};

/// Descriptive metadata every sub-repository must expose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    pub name: String,
    pub version: String,
    /// Comma-delimited author list, e.g. `"Alice, Bob"`.
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub description: String,
}

impl RepositoryMetadata {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        RepositoryMetadata {
            name: name.into(),
            version: version.into(),
            authors: String::new(),
            description: String::new(),
        }
    }

    pub fn with_authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = authors.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn author_set(&self) -> BTreeSet<String> {
        parse_authors(&self.authors)
    }
}

/// Split a comma-delimited author string into trimmed, non-empty names.
pub fn parse_authors(authors: &str) -> BTreeSet<String> {
    authors
        .split(',')
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .map(str::to_string)
        .collect()
}

/// Canonical author serialization: sorted, deduplicated, `", "`-joined.
///
/// Equal author sets always serialize to the same string.
pub fn serialize_authors<I, S>(authors: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    authors
        .into_iter()
        .map(|author| author.as_ref().trim().to_string())
        .filter(|author| !author.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Metadata of an aggregate repository, derived from its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedMetadata {
    pub name: String,
    /// Release of the aggregate itself, independent of member versions.
    pub release: Option<String>,
    /// Member versions joined with `/`, in member order.
    pub version: String,
    /// Serialized through [`serialize_authors`].
    pub authors: String,
    pub description: String,
}

impl CombinedMetadata {
    /// Pure function of its inputs; the same member list always gives the same result.
    pub fn combine<'a, I>(name: &str, release: Option<&str>, members: I) -> Self
    where
        I: IntoIterator<Item = &'a RepositoryMetadata>,
    {
        let members: Vec<&RepositoryMetadata> = members.into_iter().collect();

        let version = members
            .iter()
            .map(|m| m.version.as_str())
            .collect::<Vec<_>>()
            .join("/");

        let authors = serialize_authors(members.iter().flat_map(|m| m.author_set()));

        let listing = members
            .iter()
            .map(|m| format!("{} v{}", m.name, m.version))
            .collect::<Vec<_>>()
            .join(", ");
        let description = match release {
            Some(release) => format!(
                "A distributed repository (release {}) of several repositories: {}",
                release, listing
            ),
            None => format!("A distributed repository of several repositories: {}", listing),
        };

        CombinedMetadata {
            name: name.to_string(),
            release: release.map(str::to_string),
            version,
            authors,
            description,
        }
    }

    pub fn author_set(&self) -> BTreeSet<String> {
        parse_authors(&self.authors)
    }

    pub fn to_graph_metadata(&self) -> GraphMetadata {
        GraphMetadata {
            name: Some(self.name.clone()),
            version: Some(self.version.clone()),
            authors: Some(self.authors.clone()),
            description: Some(self.description.clone()),
        }
    }

    /// Replace the metadata attached to `graph`.
    pub fn apply(&self, graph: &mut Graph) {
        graph.set_metadata(self.to_graph_metadata());
    }
}
