//! Query results: small node/edge lists handed to presentation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Edge, Node, NodeId};

/// A set of nodes plus the edges among them.
///
/// Produced by neighborhood queries and by the chapter- and theme-scoped
/// subgraph builders. Nodes appear once each and edges are free of
/// duplicates and self-loops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subgraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Subgraph {
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.iter().any(|n| &n.id == id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn has_edge(&self, a: &NodeId, b: &NodeId) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    /// Node ids in sorted order.
    pub fn node_ids(&self) -> Vec<&NodeId> {
        let mut ids: Vec<&NodeId> = self.nodes.iter().map(|n| &n.id).collect();
        ids.sort();
        ids
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Incremental builder that keeps nodes unique and edges simple.
///
/// Adding a node whose id is already present keeps the first one. Adding an
/// edge between an already-connected pair, in either orientation, is a no-op.
#[derive(Debug, Default)]
pub struct SubgraphBuilder {
    graph: Subgraph,
    seen_nodes: HashSet<NodeId>,
    seen_edges: HashSet<(NodeId, NodeId)>,
}

impl SubgraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless one with the same id exists. Returns whether it was added.
    pub fn add_node(&mut self, node: Node) -> bool {
        if !self.seen_nodes.insert(node.id.clone()) {
            return false;
        }
        self.graph.nodes.push(node);
        true
    }

    /// Add an edge unless the pair is already connected. Self-loops are dropped.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if edge.source == edge.target {
            return false;
        }
        if !self.seen_edges.insert(edge.key()) {
            return false;
        }
        self.graph.edges.push(edge);
        true
    }

    pub fn finish(self) -> Subgraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;

    fn character(name: &str) -> Node {
        Node::new(
            NodeId::character(name),
            NodeKind::Character { name: name.into() },
        )
    }

    #[test]
    fn nodes_are_unique() {
        let mut b = SubgraphBuilder::new();
        assert!(b.add_node(character("Arjuna")));
        assert!(!b.add_node(character("Arjuna")));
        assert_eq!(b.finish().node_count(), 1);
    }

    #[test]
    fn edges_are_simple() {
        let mut b = SubgraphBuilder::new();
        let a = NodeId::character("Arjuna");
        let k = NodeId::character("Krishna");
        assert!(b.add_edge(Edge::new(a.clone(), k.clone())));
        assert!(!b.add_edge(Edge::new(k.clone(), a.clone())));
        assert!(!b.add_edge(Edge::new(a.clone(), a.clone())));
        let g = b.finish();
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge(&k, &a));
    }
}
