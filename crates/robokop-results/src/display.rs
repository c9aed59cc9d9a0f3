use serde::Serialize;

use robokop_biolink::CategoryStyle;
use robokop_trapi::{IdMap, Message};

/// A knowledge graph node as shown in the answer overview, sized by how many
/// results bind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayNode {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub categories: Vec<String>,
    pub count: usize,
}

/// Every bound knowledge graph node, in first-bound order, with the number of
/// bindings across all results.
pub fn make_display_nodes(message: &Message, style: &dyn CategoryStyle) -> Vec<DisplayNode> {
    let mut nodes: IdMap<DisplayNode> = IdMap::new();
    for result in message.results() {
        for binding in result.node_bindings.values().flatten() {
            if let Some(node) = nodes.get_mut(&binding.id) {
                node.count += 1;
                continue;
            }
            let kg_node = message.kg_node(&binding.id);
            nodes.insert(
                binding.id.clone(),
                DisplayNode {
                    id: binding.id.clone(),
                    name: kg_node.and_then(|n| n.name.clone()),
                    categories: kg_node
                        .map(|n| style.rank_categories(n.categories()))
                        .unwrap_or_default(),
                    count: 1,
                },
            );
        }
    }
    nodes.into_iter().map(|(_, node)| node).collect()
}
