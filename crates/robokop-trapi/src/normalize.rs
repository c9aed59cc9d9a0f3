//! Wire JSON ⇄ canonical query graph.

use serde_json::{json, Map, Value};

use crate::error::TrapiError;
use crate::id_map::IdMap;
use crate::model::{QEdge, QNode, QueryGraph};
use crate::strings::display_category;
use crate::wire::{coerce_to_sequence, migrate_edge, migrate_node, TrapiVersion, WireGraph};

/// Fallback display name for a node with no name, ids or categories.
pub const UNNAMED_NODE: &str = "Something";

/// List-valued fields that are dropped from wire output when empty.
const PRUNABLE: [&str; 3] = ["ids", "categories", "predicates"];

/// Wire query graph → canonical [`QueryGraph`].
///
/// Nodes without a `name` get one from [`synthesize_name`] unless turned off
/// with [`Normalizer::with_synthesized_names`].
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    version: Option<TrapiVersion>,
    synthesize_names: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            version: None,
            synthesize_names: true,
        }
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat every node and edge as coming from `version` instead of
    /// detecting the generation from field names.
    pub fn with_version(mut self, version: Option<TrapiVersion>) -> Self {
        self.version = version;
        self
    }

    /// Whether nodes that lack a `name` get a synthesized one. On by default;
    /// pass `false` to keep names exactly as the input had them.
    pub fn with_synthesized_names(mut self, enabled: bool) -> Self {
        self.synthesize_names = enabled;
        self
    }

    pub fn normalize(&self, raw: &Value) -> Result<QueryGraph, TrapiError> {
        let wire = WireGraph::from_value(raw);

        let mut nodes = IdMap::new();
        for (id, props) in wire.nodes.into_entries("n") {
            nodes.insert(id, self.normalize_node(props)?);
        }

        let mut edges = IdMap::new();
        for (id, props) in wire.edges.into_entries("e") {
            edges.insert(id, self.normalize_edge(props)?);
        }

        Ok(QueryGraph { nodes, edges })
    }

    pub fn normalize_node(&self, mut props: Map<String, Value>) -> Result<QNode, TrapiError> {
        let from = self
            .version
            .unwrap_or_else(|| TrapiVersion::detect_node(&props));
        migrate_node(&mut props, from);

        let ids = take_sequence(&mut props, "ids")?;
        let categories = take_sequence(&mut props, "categories")?;
        let is_set = match props.remove("is_set") {
            Some(Value::Bool(b)) => Some(b),
            _ => None,
        };
        let name = match props.remove("name") {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        };

        let mut node = QNode {
            ids,
            categories,
            is_set,
            name,
            extra: props,
        };
        if self.synthesize_names && node.name.is_none() {
            node.name = Some(synthesize_name(&node));
        }
        Ok(node)
    }

    pub fn normalize_edge(&self, mut props: Map<String, Value>) -> Result<QEdge, TrapiError> {
        let from = self
            .version
            .unwrap_or_else(|| TrapiVersion::detect_edge(&props));
        migrate_edge(&mut props, from);

        let subject = take_string(&mut props, "subject");
        let object = take_string(&mut props, "object");
        let predicates = take_sequence(&mut props, "predicates")?;

        Ok(QEdge {
            subject,
            object,
            predicates,
            extra: props,
        })
    }
}

fn take_sequence(props: &mut Map<String, Value>, field: &str) -> Result<Option<Vec<String>>, TrapiError> {
    match props.remove(field) {
        Some(value) => coerce_to_sequence(field, value),
        None => Ok(None),
    }
}

fn take_string(props: &mut Map<String, Value>, field: &str) -> String {
    match props.remove(field) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

/// Normalize a raw wire query graph, detecting the schema generation per
/// node/edge unless `version` is given. Unnamed nodes get synthesized names.
pub fn normalize(raw: &Value, version: Option<TrapiVersion>) -> Result<QueryGraph, TrapiError> {
    Normalizer::new().with_version(version).normalize(raw)
}

/// Display name for a node that has none of its own.
///
/// Joined ids, else the first category in words, else [`UNNAMED_NODE`].
pub fn synthesize_name(node: &QNode) -> String {
    if node.is_pinned() {
        return node.ids().join(", ");
    }
    match node.categories().first() {
        Some(category) => display_category(category),
        None => UNNAMED_NODE.to_string(),
    }
}

fn pruned(value: Value) -> Value {
    match value {
        Value::Object(mut props) => {
            for field in PRUNABLE {
                if props
                    .get(field)
                    .and_then(Value::as_array)
                    .is_some_and(|list| list.is_empty())
                {
                    props.remove(field);
                }
            }
            Value::Object(props)
        }
        other => other,
    }
}

/// Current TRAPI wire form, with empty list fields removed.
pub fn to_wire(graph: &QueryGraph) -> Value {
    let nodes: Map<String, Value> = graph
        .nodes
        .iter()
        .map(|(id, node)| (id.to_string(), pruned(json!(node))))
        .collect();
    let edges: Map<String, Value> = graph
        .edges
        .iter()
        .map(|(id, edge)| (id.to_string(), pruned(json!(edge))))
        .collect();
    json!({ "nodes": nodes, "edges": edges })
}

/// Legacy list representation: `nodes`/`edges` are arrays whose entries
/// carry their own `id`. Empty list fields are removed as in [`to_wire`].
pub fn to_list_representation(graph: &QueryGraph) -> Value {
    fn with_id(id: &str, value: Value) -> Value {
        match pruned(value) {
            Value::Object(mut props) => {
                props.insert("id".to_string(), Value::String(id.to_string()));
                Value::Object(props)
            }
            other => other,
        }
    }
    let nodes: Vec<Value> = graph
        .nodes
        .iter()
        .map(|(id, node)| with_id(id, json!(node)))
        .collect();
    let edges: Vec<Value> = graph
        .edges
        .iter()
        .map(|(id, edge)| with_id(id, json!(edge)))
        .collect();
    json!({ "nodes": nodes, "edges": edges })
}
