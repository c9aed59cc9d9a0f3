//! Sub-graph of a single selected result.

use serde::Serialize;

use robokop_biolink::CategoryStyle;
use robokop_trapi::{IdMap, Message, TrapiResult};

/// Binding lists longer than this get a prune slider in the explorer.
pub const PRUNE_SLIDER_THRESHOLD: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerNode {
    pub id: String,
    pub name: String,
    pub categories: Vec<String>,
    /// Query node this knowledge graph node is bound to.
    pub qg_id: String,
    /// Bound as one of several nodes for its query node.
    pub is_set: bool,
    /// Pruning weight: lone bindings are never pruned, set members start at
    /// zero, and every bound edge touching the node adds one.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorerEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectedResult {
    pub nodes: IdMap<ExplorerNode>,
    pub edges: IdMap<ExplorerEdge>,
    /// Bound ids with no knowledge graph entry.
    pub missing_nodes: Vec<String>,
    pub missing_edges: Vec<String>,
}

/// Collect the knowledge graph nodes and edges bound by `result`.
pub fn select_result(message: &Message, result: &TrapiResult, style: &dyn CategoryStyle) -> SelectedResult {
    let mut selected = SelectedResult::default();

    for (qg_id, bindings) in result.node_bindings.iter() {
        let lone = bindings.len() <= 1;
        for binding in bindings {
            let Some(kg_node) = message.kg_node(&binding.id) else {
                if !selected.missing_nodes.contains(&binding.id) {
                    selected.missing_nodes.push(binding.id.clone());
                }
                continue;
            };
            let categories = style.rank_categories(kg_node.categories());
            let name = kg_node
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .or_else(|| (!binding.id.is_empty()).then(|| binding.id.clone()))
                .or_else(|| categories.first().cloned())
                .unwrap_or_default();
            selected.nodes.insert(
                binding.id.clone(),
                ExplorerNode {
                    id: binding.id.clone(),
                    name,
                    categories,
                    qg_id: qg_id.to_string(),
                    is_set: !lone,
                    score: if lone { f64::INFINITY } else { 0.0 },
                },
            );
        }
    }

    for analysis in &result.analyses {
        for binding in analysis.edge_bindings.values().flatten() {
            let Some(kg_edge) = message.kg_edge(&binding.id) else {
                if !selected.missing_edges.contains(&binding.id) {
                    selected.missing_edges.push(binding.id.clone());
                }
                continue;
            };
            selected.edges.insert(
                binding.id.clone(),
                ExplorerEdge {
                    id: binding.id.clone(),
                    source: kg_edge.subject.clone(),
                    target: kg_edge.object.clone(),
                    predicate: kg_edge.predicate.clone(),
                },
            );
            for endpoint in [&kg_edge.subject, &kg_edge.object] {
                if let Some(node) = selected.nodes.get_mut(endpoint) {
                    node.score += 1.0;
                }
            }
        }
    }
    selected
}

/// Whether any query node binds more knowledge graph nodes than the explorer
/// shows without pruning.
pub fn needs_prune_slider(result: &TrapiResult) -> bool {
    result
        .node_bindings
        .values()
        .any(|bindings| bindings.len() > PRUNE_SLIDER_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use robokop_biolink::BiolinkModel;
    use serde_json::json;

    fn message() -> Message {
        Message::from_envelope(&json!({
            "message": {
                "query_graph": {"nodes": {"n0": {}, "n1": {}}, "edges": {"e0": {"subject": "n0", "object": "n1"}}},
                "knowledge_graph": {
                    "nodes": {
                        "A": {"name": "Alpha", "categories": ["biolink:Gene"]},
                        "B": {"categories": "biolink:Disease"},
                        "C": {"name": "Gamma"}
                    },
                    "edges": {
                        "k0": {"subject": "A", "object": "B", "predicate": "biolink:related_to"},
                        "k1": {"subject": "A", "object": "C", "predicate": "biolink:treats"}
                    }
                },
                "results": [{
                    "node_bindings": {
                        "n0": [{"id": "A"}],
                        "n1": [{"id": "B"}, {"id": "C"}, {"id": "Z"}]
                    },
                    "analyses": [{"edge_bindings": {"e0": [{"id": "k0"}, {"id": "k1"}, {"id": "k9"}]}}]
                }]
            }
        }))
        .unwrap()
    }

    #[test]
    fn collects_bound_nodes_and_edges() {
        let message = message();
        let result = &message.results()[0];
        let selected = select_result(&message, result, &BiolinkModel::empty());

        assert_eq!(selected.nodes.keys().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        let a = selected.nodes.get("A").unwrap();
        assert_eq!(a.qg_id, "n0");
        assert!(!a.is_set);
        assert!(a.score.is_infinite());
        let b = selected.nodes.get("B").unwrap();
        assert_eq!(b.name, "B");
        assert_eq!(b.categories, vec!["biolink:Disease".to_string()]);
        assert!(b.is_set);
        assert_eq!(b.score, 1.0);
        assert_eq!(selected.nodes.get("C").unwrap().score, 1.0);

        assert_eq!(selected.edges.len(), 2);
        assert_eq!(selected.edges.get("k1").unwrap().predicate.as_deref(), Some("biolink:treats"));
        assert_eq!(selected.missing_nodes, vec!["Z".to_string()]);
        assert_eq!(selected.missing_edges, vec!["k9".to_string()]);
    }

    #[test]
    fn prune_slider_for_large_sets() {
        let message = message();
        assert!(!needs_prune_slider(&message.results()[0]));
        let mut result = message.results()[0].clone();
        result
            .node_bindings
            .get_mut("n1")
            .unwrap()
            .push(robokop_trapi::Binding::new("D"));
        assert!(needs_prune_slider(&result));
    }
}
