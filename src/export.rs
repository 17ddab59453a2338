//! Export types handed to presentation.
//!
//! Renderers consume flat node and edge lists: `{id, label, type}` and
//! `{source, target, label?}`. Styling is left to the renderer.

use serde::{Deserialize, Serialize};

use crate::graph::index::KnowledgeGraph;
use crate::graph::{Edge, Node, NodeType, Subgraph};

/// Exported node with resolved display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeExport {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
}

impl From<&Node> for NodeExport {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.to_string(),
            label: node.label(),
            node_type: node.node_type(),
        }
    }
}

/// Exported edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeExport {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl From<&Edge> for EdgeExport {
    fn from(edge: &Edge) -> Self {
        Self {
            source: edge.source.to_string(),
            target: edge.target.to_string(),
            label: edge.label.clone(),
        }
    }
}

/// A node list plus an edge list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<NodeExport>,
    pub edges: Vec<EdgeExport>,
}

impl From<&Subgraph> for GraphExport {
    fn from(sub: &Subgraph) -> Self {
        Self {
            nodes: sub.nodes.iter().map(NodeExport::from).collect(),
            edges: sub.edges.iter().map(EdgeExport::from).collect(),
        }
    }
}

impl From<&KnowledgeGraph> for GraphExport {
    /// The whole graph. Edges with a dangling endpoint are included as-is.
    fn from(kg: &KnowledgeGraph) -> Self {
        Self {
            nodes: kg.nodes().into_iter().map(NodeExport::from).collect(),
            edges: kg.edges().iter().map(EdgeExport::from).collect(),
        }
    }
}
