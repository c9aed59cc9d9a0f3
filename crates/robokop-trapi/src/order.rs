//! Node ordering for tabular display.
//!
//! Result tables get one column per query node. Columns read best when they
//! follow the graph: start from the node the user anchored the question on,
//! then walk outwards so neighbouring columns are neighbouring nodes.

use std::collections::HashSet;

use crate::model::QueryGraph;

/// Pick the traversal root.
///
/// Only nodes with at least one edge are candidates. Pinned candidates are
/// preferred over unpinned ones; among the preferred class the lowest degree
/// wins, and ties go to the node inserted first. With no candidates the first
/// node is returned, or `None` for an empty graph.
pub fn find_starting_node(graph: &QueryGraph) -> Option<String> {
    let mut best_pinned: Option<(&str, usize)> = None;
    let mut best_unpinned: Option<(&str, usize)> = None;

    for (id, node) in graph.nodes.iter() {
        let degree = graph.degree(id);
        if degree == 0 {
            continue;
        }
        let slot = if node.is_pinned() {
            &mut best_pinned
        } else {
            &mut best_unpinned
        };
        // Strictly fewer edges replaces; equal keeps the earlier node.
        if slot.map_or(true, |(_, best)| degree < best) {
            *slot = Some((id, degree));
        }
    }

    best_pinned
        .or(best_unpinned)
        .map(|(id, _)| id)
        .or_else(|| graph.nodes.first().map(|(id, _)| id))
        .map(str::to_string)
}

/// Depth-first preorder of node ids from `start`.
///
/// Edges are scanned in insertion order and each newly reached node is
/// expanded before its siblings. Nodes not reachable from `start` follow in
/// insertion order. The result is always a permutation of the node ids; an
/// unknown `start` yields plain insertion order.
pub fn sort_nodes(graph: &QueryGraph, start: &str) -> Vec<String> {
    let mut order: Vec<String> = Vec::with_capacity(graph.nodes.len());
    let mut visited: HashSet<&str> = HashSet::with_capacity(graph.nodes.len());

    if let Some((start, _)) = graph.nodes.iter().find(|(id, _)| *id == start) {
        visit(graph, start, &mut visited, &mut order);
    }

    for id in graph.nodes.keys() {
        if visited.insert(id) {
            order.push(id.to_string());
        }
    }
    order
}

fn visit<'g>(
    graph: &'g QueryGraph,
    node_id: &'g str,
    visited: &mut HashSet<&'g str>,
    order: &mut Vec<String>,
) {
    if !visited.insert(node_id) {
        return;
    }
    order.push(node_id.to_string());

    for (_, edge) in graph.incident_edges(node_id) {
        let Some(next) = edge.other_end(node_id) else {
            continue;
        };
        // Only follow edges into nodes the graph actually has.
        let Some((next, _)) = graph.nodes.iter().find(|(id, _)| *id == next) else {
            continue;
        };
        if !visited.contains(next) {
            visit(graph, next, visited, order);
        }
    }
}
