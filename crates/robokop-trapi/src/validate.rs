//! Structural validation of TRAPI documents.
//!
//! Validation runs on raw JSON (before normalization) so it can report on
//! uploads that would not even deserialize. Nothing here fails or panics:
//! every check yields issues, and the caller decides whether they block an
//! upload or are only shown as warnings.

use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::{QueryGraph, TrapiResult};

pub const QUERY_GRAPH_LABEL: &str = "Query Graph";
pub const KNOWLEDGE_GRAPH_LABEL: &str = "Knowledge Graph";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphIssue {
    #[error("{label} is not a valid JSON object")]
    NotAnObject { label: String },
    #[error("{label} requires a \"nodes\" property")]
    MissingNodes { label: String },
    #[error("{label} nodes should be an object")]
    NodesNotAnObject { label: String },
    #[error("There are multiple {} nodes with the same ID", .label.to_lowercase())]
    DuplicateNodeIds { label: String },
    #[error("{label} requires an \"edges\" property")]
    MissingEdges { label: String },
    #[error("{label} edges should be an object")]
    EdgesNotAnObject { label: String },
    #[error("Each {} edge must have a valid \"subject\" and \"object\" property", .label.to_lowercase())]
    InvalidEdgeEndpoints { label: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultIssue {
    #[error("Message results should be an array")]
    NotAnArray,
    #[error("Result is not a valid JSON object")]
    NotAnObject,
    #[error("No node_bindings in result object")]
    MissingNodeBindings,
    #[error("Results node_bindings is not a valid JSON object")]
    NodeBindingsNotAnObject,
    #[error("No analyses in result object")]
    MissingAnalyses,
    #[error("Results analyses is not an array")]
    AnalysesNotAnArray,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageIssue {
    #[error("The uploaded message isn't a valid JSON object.")]
    NotAnObject,
    #[error("The uploaded message should have a parent property of \"message\".")]
    MissingEnvelope,
    #[error(transparent)]
    Graph(#[from] GraphIssue),
    #[error(transparent)]
    Result(#[from] ResultIssue),
}

/// Bindings that do not line up with the query graph they answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingIssue {
    #[error("Result {result} binds unknown query node \"{node_id}\"")]
    UnknownQueryNode { result: usize, node_id: String },
    #[error("Result {result} binds unknown query edge \"{edge_id}\"")]
    UnknownQueryEdge { result: usize, edge_id: String },
}

fn present<'a>(message: &'a Value, field: &str) -> Option<&'a Value> {
    message.get(field).filter(|v| !v.is_null())
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// All structural issues of a raw graph. Each rule is checked on its own.
pub fn graph_issues(graph: &Value, label: &str) -> Vec<GraphIssue> {
    let label = label.to_string();
    let Some(graph) = graph.as_object() else {
        return vec![GraphIssue::NotAnObject { label }];
    };

    let mut issues = Vec::new();

    let node_ids: Option<&Map<String, Value>> = match graph.get("nodes") {
        None | Some(Value::Null) => {
            issues.push(GraphIssue::MissingNodes {
                label: label.clone(),
            });
            None
        }
        Some(Value::Array(list)) => {
            issues.push(GraphIssue::NodesNotAnObject {
                label: label.clone(),
            });
            let mut seen = HashSet::new();
            let duplicated = list
                .iter()
                .filter_map(|node| node.get("id").and_then(Value::as_str))
                .any(|id| !seen.insert(id));
            if duplicated {
                issues.push(GraphIssue::DuplicateNodeIds {
                    label: label.clone(),
                });
            }
            None
        }
        Some(Value::Object(nodes)) => Some(nodes),
        // A scalar: neither missing nor a list; the edge check cannot resolve against it.
        Some(_) => {
            issues.push(GraphIssue::NodesNotAnObject {
                label: label.clone(),
            });
            None
        }
    };

    match graph.get("edges") {
        None | Some(Value::Null) => issues.push(GraphIssue::MissingEdges {
            label: label.clone(),
        }),
        Some(Value::Array(_)) => issues.push(GraphIssue::EdgesNotAnObject {
            label: label.clone(),
        }),
        Some(Value::Object(edges)) => {
            let all_valid = edges.values().all(|edge| {
                let subject = non_empty_str(edge.get("subject"));
                let object = non_empty_str(edge.get("object"));
                match (subject, object, node_ids) {
                    (Some(s), Some(o), Some(nodes)) => nodes.contains_key(s) && nodes.contains_key(o),
                    (Some(_), Some(_), None) => true,
                    _ => false,
                }
            });
            if !all_valid {
                issues.push(GraphIssue::InvalidEdgeEndpoints { label });
            }
        }
        Some(_) => issues.push(GraphIssue::EdgesNotAnObject { label }),
    }

    issues
}

/// Rendered [`graph_issues`]; empty means valid.
pub fn validate_graph(graph: &Value, label: &str) -> Vec<String> {
    graph_issues(graph, label)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Issues in a results array, stopping after the first malformed result.
pub fn result_issues(results: &Value) -> Vec<ResultIssue> {
    let Some(results) = results.as_array() else {
        return vec![ResultIssue::NotAnArray];
    };

    let mut issues = Vec::new();
    for result in results {
        let Some(result) = result.as_object() else {
            issues.push(ResultIssue::NotAnObject);
            break;
        };
        match result.get("node_bindings") {
            None => issues.push(ResultIssue::MissingNodeBindings),
            Some(Value::Object(_)) => {}
            Some(_) => issues.push(ResultIssue::NodeBindingsNotAnObject),
        }
        match result.get("analyses") {
            None => issues.push(ResultIssue::MissingAnalyses),
            Some(Value::Array(_)) => {}
            Some(_) => issues.push(ResultIssue::AnalysesNotAnArray),
        }
        if !issues.is_empty() {
            break;
        }
    }
    issues
}

pub fn validate_results(results: &Value) -> Vec<String> {
    result_issues(results)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Issues in a full `{ "message": { ... } }` document.
///
/// The query graph is always checked; the knowledge graph and results only
/// when present, since an uploaded question may not have answers yet.
pub fn message_issues(document: &Value) -> Vec<MessageIssue> {
    let Some(document) = document.as_object() else {
        return vec![MessageIssue::NotAnObject];
    };
    let Some(message) = document.get("message") else {
        return vec![MessageIssue::MissingEnvelope];
    };

    let mut issues: Vec<MessageIssue> =
        graph_issues(present(message, "query_graph").unwrap_or(&Value::Null), QUERY_GRAPH_LABEL)
            .into_iter()
            .map(MessageIssue::from)
            .collect();
    if let Some(kg) = present(message, "knowledge_graph") {
        issues.extend(
            graph_issues(kg, KNOWLEDGE_GRAPH_LABEL)
                .into_iter()
                .map(MessageIssue::from),
        );
    }
    if let Some(results) = present(message, "results") {
        issues.extend(result_issues(results).into_iter().map(MessageIssue::from));
    }
    issues
}

pub fn validate_message(document: &Value) -> Vec<String> {
    message_issues(document)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Check a canonical query graph: every edge must join two existing nodes.
pub fn validate_query_graph(graph: &QueryGraph) -> Vec<GraphIssue> {
    let dangling = graph.edges.values().any(|edge| {
        edge.subject.is_empty()
            || edge.object.is_empty()
            || !graph.nodes.contains_key(&edge.subject)
            || !graph.nodes.contains_key(&edge.object)
    });
    if dangling {
        vec![GraphIssue::InvalidEdgeEndpoints {
            label: QUERY_GRAPH_LABEL.to_string(),
        }]
    } else {
        Vec::new()
    }
}

/// Check that result bindings only mention query graph ids.
pub fn validate_bindings(graph: &QueryGraph, results: &[TrapiResult]) -> Vec<BindingIssue> {
    let mut issues = Vec::new();
    for (index, result) in results.iter().enumerate() {
        for node_id in result.node_bindings.keys() {
            if !graph.nodes.contains_key(node_id) {
                issues.push(BindingIssue::UnknownQueryNode {
                    result: index,
                    node_id: node_id.to_string(),
                });
            }
        }
        for analysis in &result.analyses {
            for edge_id in analysis.edge_bindings.keys() {
                if !graph.edges.contains_key(edge_id) {
                    issues.push(BindingIssue::UnknownQueryEdge {
                        result: index,
                        edge_id: edge_id.to_string(),
                    });
                }
            }
        }
    }
    issues
}
