//! In-memory knowledge graph with an id index.
//!
//! Uses a `petgraph` undirected graph for structure and a `HashMap` from
//! [`NodeId`] to node slot for O(1) lookups. Edges are keyed by id, so an edge
//! may name an endpoint before (or without) that node being materialized.
//! Such a slot stays a *dangling* endpoint unless a node with that id is
//! inserted later.

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::corpus::Reference;
use crate::error::GraphError;

use super::{Edge, EdgeData, Node, NodeId, Subgraph, SubgraphBuilder};

/// Result type for graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// Immutable knowledge graph produced by [`build`](super::build::build).
///
/// Mutation is crate-private: once a graph leaves the builder it is only
/// read, which makes it safe to share between threads without locking.
pub struct KnowledgeGraph {
    /// The undirected graph: weights are node ids, edges carry EdgeData.
    graph: UnGraph<NodeId, EdgeData>,
    /// NodeId → slot, for every id ever named (materialized or dangling).
    node_index: HashMap<NodeId, NodeIndex>,
    /// Materialized nodes with their attributes.
    nodes: HashMap<NodeId, Node>,
    /// Reverse problem index: (chapter, verse) → problem ids referencing it.
    problem_index: HashMap<Reference, BTreeSet<String>>,
}

impl KnowledgeGraph {
    pub(crate) fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            node_index: HashMap::new(),
            nodes: HashMap::new(),
            problem_index: HashMap::new(),
        }
    }

    /// Ensure a slot exists for the given id, returning its NodeIndex.
    fn ensure_slot(&mut self, id: &NodeId) -> NodeIndex {
        if let Some(idx) = self.node_index.get(id) {
            return *idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.node_index.insert(id.clone(), idx);
        idx
    }

    /// Materialize a node. Replaces the attributes of an existing node with the same id.
    pub(crate) fn insert_node(&mut self, node: Node) {
        self.ensure_slot(&node.id);
        self.nodes.insert(node.id.clone(), node);
    }

    /// Insert an undirected edge between two ids.
    ///
    /// Returns `false` when the pair is already connected or the edge would be
    /// a self-loop; the graph stays simple either way.
    pub(crate) fn insert_edge(&mut self, a: &NodeId, b: &NodeId, label: Option<String>) -> bool {
        let ia = self.ensure_slot(a);
        let ib = self.ensure_slot(b);
        if ia == ib || self.graph.find_edge(ia, ib).is_some() {
            return false;
        }
        self.graph.add_edge(ia, ib, EdgeData { label });
        true
    }

    /// Record that `problem` references `reference`.
    pub(crate) fn index_reference(&mut self, reference: Reference, problem: &str) {
        self.problem_index
            .entry(reference)
            .or_default()
            .insert(problem.to_string());
    }

    /// Check if a node is materialized.
    pub fn has_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get a node's attributes.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a node or fail with [`GraphError::NodeNotFound`].
    pub fn require_node(&self, id: &NodeId) -> GraphResult<&Node> {
        self.nodes.get(id).ok_or_else(|| GraphError::NodeNotFound {
            id: id.to_string(),
        })
    }

    /// Number of materialized nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, including edges with a dangling endpoint.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All materialized nodes, sorted by id.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> Vec<Edge> {
        self.graph
            .edge_indices()
            .filter_map(|ei| {
                let (a, b) = self.graph.edge_endpoints(ei)?;
                let data = self.graph.edge_weight(ei)?;
                Some(Edge {
                    source: self.graph[a].clone(),
                    target: self.graph[b].clone(),
                    label: data.label.clone(),
                })
            })
            .collect()
    }

    /// Whether `a` and `b` are directly connected.
    pub fn has_edge(&self, a: &NodeId, b: &NodeId) -> bool {
        match (self.node_index.get(a), self.node_index.get(b)) {
            (Some(&ia), Some(&ib)) => self.graph.find_edge(ia, ib).is_some(),
            _ => false,
        }
    }

    /// Materialized nodes directly connected to `id`, sorted.
    pub fn neighbors(&self, id: &NodeId) -> Vec<&NodeId> {
        let Some(&idx) = self.node_index.get(id) else {
            return vec![];
        };
        let mut out: Vec<&NodeId> = self
            .graph
            .neighbors(idx)
            .map(|n| &self.graph[n])
            .filter(|n| self.nodes.contains_key(*n))
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Ids that appear as an edge endpoint but were never materialized.
    pub fn dangling_ids(&self) -> Vec<&NodeId> {
        let mut ids: Vec<&NodeId> = self
            .node_index
            .keys()
            .filter(|id| !self.nodes.contains_key(*id))
            .collect();
        ids.sort();
        ids
    }

    /// The subgraph induced by `members`: those nodes plus every edge of this
    /// graph whose endpoints are both members.
    ///
    /// Unknown and dangling ids are skipped. Nodes keep the order given.
    pub fn induced_subgraph<'a>(&self, members: impl IntoIterator<Item = &'a NodeId>) -> Subgraph {
        let mut out = SubgraphBuilder::new();
        let mut member_idx: Vec<NodeIndex> = Vec::new();
        let mut member_set: HashSet<NodeIndex> = HashSet::new();

        for id in members {
            let (Some(node), Some(&idx)) = (self.nodes.get(id), self.node_index.get(id)) else {
                continue;
            };
            if member_set.insert(idx) {
                member_idx.push(idx);
                out.add_node(node.clone());
            }
        }

        let mut seen_edges = HashSet::new();
        for &idx in &member_idx {
            for e in self.graph.edges(idx) {
                let other = if e.source() == idx { e.target() } else { e.source() };
                if other == idx || !member_set.contains(&other) || !seen_edges.insert(e.id()) {
                    continue;
                }
                let Some((a, b)) = self.graph.edge_endpoints(e.id()) else {
                    continue;
                };
                out.add_edge(Edge {
                    source: self.graph[a].clone(),
                    target: self.graph[b].clone(),
                    label: e.weight().label.clone(),
                });
            }
        }

        out.finish()
    }

    /// Problem ids referencing `(chapter, verse)`, in sorted order.
    pub fn problems_for_verse(&self, chapter: u32, verse: u32) -> Vec<&str> {
        self.problem_index
            .get(&Reference::new(chapter, verse))
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for KnowledgeGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeGraph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .field("dangling", &self.dangling_ids().len())
            .finish()
    }
}
