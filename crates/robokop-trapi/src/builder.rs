//! Query graph editing.
//!
//! [`QueryBuilder`] owns the graph being edited in the question builder and
//! applies the editing operations the UI offers. After every operation it
//! re-derives the root node and whether the graph can be submitted.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::error::TrapiError;
use crate::model::{EdgeId, NodeId, QEdge, QNode, QueryGraph};
use crate::order::find_starting_node;
use crate::validate::{validate_query_graph, GraphIssue};

/// Predicate given to every new edge.
pub const DEFAULT_PREDICATE: &str = "biolink:related_to";

/// Why the graph in the builder cannot be submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditIssue {
    #[error("There are no terms left. Please add a new term to continue.")]
    NoTerms,
    #[error("There is at least one disconnected term in this question.")]
    DisconnectedTerm,
    #[error(transparent)]
    Graph(#[from] GraphIssue),
}

/// Which end of an edge an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Subject,
    Object,
}

/// One line of the sentence-style text editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEditorRow {
    pub edge_id: EdgeId,
    /// The subject already appeared on an earlier row.
    pub subject_is_reference: bool,
    /// The object already appeared on an earlier row (or is the subject).
    pub object_is_reference: bool,
}

pub fn default_node() -> QNode {
    QNode {
        ids: Some(Vec::new()),
        categories: Some(Vec::new()),
        ..QNode::default()
    }
}

pub fn default_edge(subject: &str, object: &str) -> QEdge {
    QEdge {
        predicates: Some(vec![DEFAULT_PREDICATE.to_string()]),
        ..QEdge::new(subject, object)
    }
}

/// `n0 -e0-> n1` with blank nodes.
pub fn default_query_graph() -> QueryGraph {
    let mut graph = QueryGraph::default();
    graph.nodes.insert("n0", default_node());
    graph.nodes.insert("n1", default_node());
    graph.edges.insert("e0", default_edge("n0", "n1"));
    graph
}

fn next_free_id(prefix: char, taken: impl Fn(&str) -> bool) -> String {
    (0..)
        .map(|index| format!("{prefix}{index}"))
        .find(|id| !taken(id))
        .unwrap_or_default()
}

/// Lowest unused `n<k>`.
pub fn next_node_id(graph: &QueryGraph) -> NodeId {
    next_free_id('n', |id| graph.nodes.contains_key(id))
}

/// Lowest unused `e<k>`.
pub fn next_edge_id(graph: &QueryGraph) -> EdgeId {
    next_free_id('e', |id| graph.edges.contains_key(id))
}

/// Keep `current` while it still has edges, otherwise pick a fresh root.
pub fn root_node(graph: &QueryGraph, current: Option<&str>) -> Option<NodeId> {
    match current {
        Some(root) if graph.degree(root) > 0 => Some(root.to_string()),
        _ => find_starting_node(graph),
    }
}

/// Drop every node and edge not connected to `root`.
///
/// With no root the graph is emptied.
pub fn remove_detached_from_root(graph: &mut QueryGraph, root: Option<&str>) {
    let mut connected: HashSet<String> = HashSet::new();
    if let Some(root) = root {
        connected.insert(root.to_string());
    }

    let mut grew = true;
    while grew {
        grew = false;
        for edge in graph.edges.values() {
            let subject_in = connected.contains(&edge.subject);
            let object_in = connected.contains(&edge.object);
            if subject_in != object_in {
                connected.insert(edge.subject.clone());
                connected.insert(edge.object.clone());
                grew = true;
            }
        }
    }

    graph
        .edges
        .retain(|_, edge| connected.contains(&edge.subject) || connected.contains(&edge.object));
    graph.nodes.retain(|id, _| connected.contains(id));
}

/// First reason the graph cannot be submitted, if any.
pub fn edit_issue(graph: &QueryGraph) -> Option<EditIssue> {
    if graph.nodes.is_empty() {
        return Some(EditIssue::NoTerms);
    }
    if graph.nodes.keys().any(|id| graph.degree(id) == 0) {
        return Some(EditIssue::DisconnectedTerm);
    }
    validate_query_graph(graph)
        .into_iter()
        .next()
        .map(EditIssue::from)
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilder {
    graph: QueryGraph,
    root: Option<NodeId>,
    issue: Option<EditIssue>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            graph: default_query_graph(),
            root: Some("n0".to_string()),
            issue: None,
        }
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing (already normalized) graph.
    pub fn from_graph(graph: QueryGraph) -> Self {
        let root = find_starting_node(&graph);
        let issue = edit_issue(&graph);
        Self { graph, root, issue }
    }

    pub fn graph(&self) -> &QueryGraph {
        &self.graph
    }

    pub fn into_graph(self) -> QueryGraph {
        self.graph
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.issue.is_none()
    }

    pub fn issue(&self) -> Option<&EditIssue> {
        self.issue.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.issue.as_ref().map(ToString::to_string)
    }

    pub fn add_node(&mut self) -> NodeId {
        let id = next_node_id(&self.graph);
        self.graph.nodes.insert(id.clone(), default_node());
        self.refresh();
        id
    }

    pub fn add_edge(&mut self, subject: &str, object: &str) -> EdgeId {
        let id = next_edge_id(&self.graph);
        self.graph.edges.insert(id.clone(), default_edge(subject, object));
        self.refresh();
        id
    }

    /// Add a new node joined by a new edge from `from`, or from the most
    /// recently inserted node.
    pub fn add_hop(&mut self, from: Option<&str>) -> (NodeId, EdgeId) {
        let node_id = next_node_id(&self.graph);
        let edge_id = next_edge_id(&self.graph);
        let subject = match from {
            Some(id) => id.to_string(),
            None => self
                .graph
                .nodes
                .last()
                .map(|(id, _)| id.to_string())
                .unwrap_or_default(),
        };
        self.graph
            .edges
            .insert(edge_id.clone(), default_edge(&subject, &node_id));
        self.graph.nodes.insert(node_id.clone(), default_node());
        self.refresh();
        (node_id, edge_id)
    }

    /// Replace a node's properties; `None` resets it to a blank node.
    pub fn edit_node(&mut self, id: &str, node: Option<QNode>) {
        self.graph
            .nodes
            .insert(id, node.unwrap_or_else(default_node));
        self.refresh();
    }

    pub fn edit_predicates(&mut self, edge_id: &str, predicates: Vec<String>) -> Result<(), TrapiError> {
        let edge = self
            .graph
            .edges
            .get_mut(edge_id)
            .ok_or_else(|| TrapiError::UnknownEdge(edge_id.to_string()))?;
        edge.predicates = Some(predicates);
        self.refresh();
        Ok(())
    }

    /// Point one end of an edge at `target`, or at a new blank node when
    /// `target` is `None`. Parts no longer connected to the root are removed.
    pub fn edit_edge(
        &mut self,
        edge_id: &str,
        endpoint: Endpoint,
        target: Option<&str>,
    ) -> Result<NodeId, TrapiError> {
        if !self.graph.edges.contains_key(edge_id) {
            return Err(TrapiError::UnknownEdge(edge_id.to_string()));
        }
        let node_id = match target {
            Some(id) => id.to_string(),
            None => {
                let id = next_node_id(&self.graph);
                self.graph.nodes.insert(id.clone(), default_node());
                id
            }
        };
        if let Some(edge) = self.graph.edges.get_mut(edge_id) {
            match endpoint {
                Endpoint::Subject => edge.subject = node_id.clone(),
                Endpoint::Object => edge.object = node_id.clone(),
            }
        }
        self.reroot_and_trim();
        Ok(node_id)
    }

    pub fn delete_edge(&mut self, edge_id: &str) -> Result<(), TrapiError> {
        self.graph
            .edges
            .remove(edge_id)
            .ok_or_else(|| TrapiError::UnknownEdge(edge_id.to_string()))?;
        self.reroot_and_trim();
        Ok(())
    }

    /// Remove a node together with every edge attached to it.
    pub fn delete_node(&mut self, node_id: &str) -> Result<(), TrapiError> {
        self.graph
            .nodes
            .remove(node_id)
            .ok_or_else(|| TrapiError::UnknownNode(node_id.to_string()))?;
        self.graph.edges.retain(|_, edge| !edge.touches(node_id));
        self.reroot_and_trim();
        Ok(())
    }

    /// Rows for the text editor, with the first edge leaving the root moved
    /// to the top. Empty while the graph is invalid.
    pub fn text_editor_rows(&self) -> Vec<TextEditorRow> {
        if !self.is_valid() {
            return Vec::new();
        }
        let mut edge_ids: Vec<&str> = self.graph.edges.keys().collect();
        let root = self.root.as_deref();
        if let Some(index) = self
            .graph
            .edges
            .iter()
            .position(|(_, edge)| Some(edge.subject.as_str()) == root)
        {
            let first = edge_ids.remove(index);
            edge_ids.insert(0, first);
        }

        let mut mentioned: HashSet<&str> = HashSet::new();
        edge_ids
            .into_iter()
            .filter_map(|edge_id| {
                let edge = self.graph.edges.get(edge_id)?;
                let subject_is_reference = !mentioned.insert(edge.subject.as_str());
                let object_is_reference = !mentioned.insert(edge.object.as_str());
                Some(TextEditorRow {
                    edge_id: edge_id.to_string(),
                    subject_is_reference,
                    object_is_reference,
                })
            })
            .collect()
    }

    fn reroot_and_trim(&mut self) {
        self.root = root_node(&self.graph, self.root.as_deref());
        remove_detached_from_root(&mut self.graph, self.root.as_deref());
        self.refresh();
    }

    fn refresh(&mut self) {
        self.issue = edit_issue(&self.graph);
    }
}
