//! Core data structures for the knowledge graph

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Stable identifier for a node, derived from its identity fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(kind: NodeKind, namespace: &str, name: &str, variants: &[String]) -> Self {
        let mut hasher = DefaultHasher::new();
        kind.hash(&mut hasher);
        namespace.hash(&mut hasher);
        name.hash(&mut hasher);
        variants.hash(&mut hasher);
        NodeId(hasher.finish())
    }
}

/// Stable identifier for an edge (hash of endpoints, relation and provenance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct EdgeId(pub u64);

/// The biological function a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    // ── Molecular entities ──────────────────────────────────
    Protein,
    Gene,
    Rna,
    MicroRna,
    Abundance,

    // ── Groupings ───────────────────────────────────────────
    Complex,
    Composite,
    Reaction,

    // ── Phenotypes ──────────────────────────────────────────
    BiologicalProcess,
    Pathology,
}

impl NodeKind {
    /// The short BEL function name used in labels.
    pub fn function(&self) -> &'static str {
        match self {
            NodeKind::Protein => "p",
            NodeKind::Gene => "g",
            NodeKind::Rna => "r",
            NodeKind::MicroRna => "m",
            NodeKind::Abundance => "a",
            NodeKind::Complex => "complex",
            NodeKind::Composite => "composite",
            NodeKind::Reaction => "rxn",
            NodeKind::BiologicalProcess => "bp",
            NodeKind::Pathology => "path",
        }
    }

    /// Genes and their products; these are the members of exported gene sets.
    pub fn is_gene_product(&self) -> bool {
        matches!(
            self,
            NodeKind::Protein | NodeKind::Gene | NodeKind::Rna | NodeKind::MicroRna
        )
    }
}

/// A single entity in the knowledge graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub namespace: String,
    pub name: String,
    /// Database identifier, informational only.
    pub identifier: Option<String>,
    /// Ordered variant descriptors, e.g. `pmod(Ph, Ser, 202)`.
    pub variants: Vec<String>,
}

impl GraphNode {
    pub fn new(kind: NodeKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let name = name.into();
        GraphNode {
            id: NodeId::new(kind, &namespace, &name, &[]),
            kind,
            namespace,
            name,
            identifier: None,
            variants: Vec::new(),
        }
    }

    pub fn protein(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(NodeKind::Protein, namespace, name)
    }

    pub fn gene(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(NodeKind::Gene, namespace, name)
    }

    /// Attach a variant; the node id is recomputed.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variants.push(variant.into());
        self.id = self.compute_id();
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Recompute the identity hash from the identity fields.
    pub fn compute_id(&self) -> NodeId {
        NodeId::new(self.kind, &self.namespace, &self.name, &self.variants)
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}:{}", self.kind.function(), self.namespace, self.name)?;
        for variant in &self.variants {
            write!(f, ", {}", variant)?;
        }
        write!(f, ")")
    }
}

/// What kind of relationship an edge asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    // ── Causal ──────────────────────────────────────────────
    Increases,
    DirectlyIncreases,
    Decreases,
    DirectlyDecreases,
    Regulates,
    CausesNoChange,

    // ── Correlative ─────────────────────────────────────────
    Association,
    PositiveCorrelation,
    NegativeCorrelation,

    // ── Structural ──────────────────────────────────────────
    HasVariant,
    HasComponent,
    PartOf,
    IsA,
}

impl Relation {
    /// The BEL keyword, used as the SIF relation column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Increases => "increases",
            Relation::DirectlyIncreases => "directlyIncreases",
            Relation::Decreases => "decreases",
            Relation::DirectlyDecreases => "directlyDecreases",
            Relation::Regulates => "regulates",
            Relation::CausesNoChange => "causesNoChange",
            Relation::Association => "association",
            Relation::PositiveCorrelation => "positiveCorrelation",
            Relation::NegativeCorrelation => "negativeCorrelation",
            Relation::HasVariant => "hasVariant",
            Relation::HasComponent => "hasComponent",
            Relation::PartOf => "partOf",
            Relation::IsA => "isA",
        }
    }

    pub fn is_causal(&self) -> bool {
        matches!(
            self,
            Relation::Increases
                | Relation::DirectlyIncreases
                | Relation::Decreases
                | Relation::DirectlyDecreases
                | Relation::Regulates
        )
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, Relation::DirectlyIncreases | Relation::DirectlyDecreases)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literature provenance for an edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Citation {
    /// Source database, e.g. `pubmed`.
    pub db: String,
    pub reference: String,
}

impl Citation {
    pub fn pubmed(reference: impl Into<String>) -> Self {
        Citation {
            db: "pubmed".to_string(),
            reference: reference.into(),
        }
    }
}

/// A directed, attributed edge in the knowledge graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub relation: Relation,
    pub citation: Option<Citation>,
    pub evidence: Option<String>,
    pub annotations: BTreeMap<String, BTreeSet<String>>,
}

impl GraphEdge {
    pub fn new(source: NodeId, target: NodeId, relation: Relation) -> Self {
        let mut edge = GraphEdge {
            id: EdgeId::default(),
            source,
            target,
            relation,
            citation: None,
            evidence: None,
            annotations: BTreeMap::new(),
        };
        edge.id = edge.compute_id();
        edge
    }

    pub fn with_citation(mut self, citation: Citation) -> Self {
        self.citation = Some(citation);
        self.id = self.compute_id();
        self
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self.id = self.compute_id();
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations
            .entry(key.into())
            .or_default()
            .insert(value.into());
        self.id = self.compute_id();
        self
    }

    /// Recompute the identity hash. Two edges with the same id are duplicates.
    pub fn compute_id(&self) -> EdgeId {
        let mut hasher = DefaultHasher::new();
        self.source.hash(&mut hasher);
        self.target.hash(&mut hasher);
        self.relation.hash(&mut hasher);
        self.citation.hash(&mut hasher);
        self.evidence.hash(&mut hasher);
        self.annotations.hash(&mut hasher);
        EdgeId(hasher.finish())
    }
}

/// Descriptive metadata attached to a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMetadata {
    pub name: Option<String>,
    pub version: Option<String>,
    pub authors: Option<String>,
    pub description: Option<String>,
}
