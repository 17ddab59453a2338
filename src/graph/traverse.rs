//! Ego-network extraction.
//!
//! An ego network of radius `r` is the subgraph induced by a center node and
//! every node within `r` hops of it. The induced edge set includes edges
//! between two neighbors, not only the edges touching the center.

use std::collections::{HashSet, VecDeque};

use super::index::{GraphResult, KnowledgeGraph};
use super::{NodeId, Subgraph};

/// Ego network of radius 1 around `center`.
///
/// Fails with [`GraphError::NodeNotFound`](crate::error::GraphError::NodeNotFound)
/// when `center` is not a node of the graph.
pub fn neighborhood(graph: &KnowledgeGraph, center: &NodeId) -> GraphResult<Subgraph> {
    ego_network(graph, center, 1)
}

/// Ego network of arbitrary radius, collected by BFS from `center`.
///
/// The center is always the first node of the result. Dangling endpoints are
/// not nodes and are never visited.
pub fn ego_network(graph: &KnowledgeGraph, center: &NodeId, radius: usize) -> GraphResult<Subgraph> {
    graph.require_node(center)?;

    let mut visited: HashSet<&NodeId> = HashSet::new();
    let mut order: Vec<&NodeId> = Vec::new();
    // BFS queue: (node, current_depth)
    let mut queue: VecDeque<(&NodeId, usize)> = VecDeque::new();

    visited.insert(center);
    order.push(center);
    queue.push_back((center, 0));

    while let Some((node, depth)) = queue.pop_front() {
        if depth >= radius {
            continue;
        }
        for neighbor in graph.neighbors(node) {
            if visited.insert(neighbor) {
                order.push(neighbor);
                queue.push_back((neighbor, depth + 1));
            }
        }
    }

    let sub = graph.induced_subgraph(order);
    tracing::debug!(
        center = %center,
        radius,
        nodes = sub.node_count(),
        edges = sub.edge_count(),
        "extracted ego network"
    );
    Ok(sub)
}
