//! Knowledge Graph: the undirected problem/chapter/shloka graph.
//!
//! - **Data model** (this module): [`NodeId`], [`Node`], [`NodeKind`], [`Edge`], [`Subgraph`]
//! - **Storage** ([`index::KnowledgeGraph`]): `petgraph` undirected graph plus an id index
//! - **Construction** ([`build`]): deterministic build from a [`Corpus`](crate::corpus::Corpus)
//! - **Traversal** ([`traverse`]): ego networks around a center node
//!
//! Node ids are composite strings (`Problem_anger`, `Chapter_2`, `Shloka_2_56`).
//! They are the external identity of a node and are resolved through a map;
//! nothing ever parses them back apart.

pub mod build;
pub mod index;
pub mod subgraph;
pub mod traverse;

use serde::{Deserialize, Serialize};

pub use subgraph::{Subgraph, SubgraphBuilder};

/// Deterministic composite key identifying a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// `Problem_<id>`
    pub fn problem(id: &str) -> Self {
        Self(format!("Problem_{id}"))
    }

    /// `Chapter_<number>`
    pub fn chapter(number: u32) -> Self {
        Self(format!("Chapter_{number}"))
    }

    /// `Shloka_<chapter>_<verse>`
    pub fn shloka(chapter: u32, verse: u32) -> Self {
        Self(format!("Shloka_{chapter}_{verse}"))
    }

    /// `Theme_<theme>`, used by theme relationship subgraphs.
    pub fn theme(theme: &str) -> Self {
        Self(format!("Theme_{theme}"))
    }

    /// `Event_<description>`, used by character subgraphs.
    pub fn event(description: &str) -> Self {
        Self(format!("Event_{description}"))
    }

    /// `Character_<name>`, used by character subgraphs.
    pub fn character(name: &str) -> Self {
        Self(format!("Character_{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Type tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Problem,
    Chapter,
    Shloka,
    Theme,
    Event,
    Character,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Problem => "problem",
            Self::Chapter => "chapter",
            Self::Shloka => "shloka",
            Self::Theme => "theme",
            Self::Event => "event",
            Self::Character => "character",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind node attributes.
///
/// The main graph only holds `Problem`, `Chapter` and `Shloka` nodes. The
/// remaining kinds appear in chapter-scoped and theme-scoped subgraphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Problem {
        name: String,
        description: String,
    },
    Chapter {
        number: u32,
        name: String,
        summary: String,
        main_theme: String,
    },
    Shloka {
        chapter: u32,
        verse: u32,
        sanskrit_text: String,
        meaning: String,
        interpretation: String,
    },
    Theme {
        name: String,
    },
    Event {
        description: String,
    },
    Character {
        name: String,
    },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Problem { .. } => NodeType::Problem,
            Self::Chapter { .. } => NodeType::Chapter,
            Self::Shloka { .. } => NodeType::Shloka,
            Self::Theme { .. } => NodeType::Theme,
            Self::Event { .. } => NodeType::Event,
            Self::Character { .. } => NodeType::Character,
        }
    }
}

/// A node: its id plus kind-specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self { id, kind }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Human-readable display label.
    pub fn label(&self) -> String {
        match &self.kind {
            NodeKind::Problem { name, .. } => name.clone(),
            NodeKind::Chapter { number, name, .. } => format!("Chapter {number}: {name}"),
            NodeKind::Shloka { verse, .. } => format!("Shloka {verse}"),
            NodeKind::Theme { name } => name.clone(),
            NodeKind::Event { description } => description.clone(),
            NodeKind::Character { name } => name.clone(),
        }
    }
}

/// Edge data stored on petgraph edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Optional relation label (e.g. `contains`).
    pub label: Option<String>,
}

/// An undirected edge between two node ids.
///
/// `source`/`target` keep insertion order for presentation; equality of edge
/// sets should go through [`Edge::key`], which ignores orientation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Orientation-free key: the endpoints in sorted order.
    pub fn key(&self) -> (NodeId, NodeId) {
        if self.source <= self.target {
            (self.source.clone(), self.target.clone())
        } else {
            (self.target.clone(), self.source.clone())
        }
    }

    /// Whether this edge joins `a` and `b`, in either orientation.
    pub fn connects(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }
}
