//! Wire formats and schema migrations.
//!
//! The query graph wire format has changed several times:
//!
//! | generation | node fields                 | edge fields                          | containers |
//! |------------|-----------------------------|--------------------------------------|------------|
//! | 0.9        | `curie`, `type`, `set`      | `source_id`, `target_id`, `type`     | lists      |
//! | 1.0        | `id`, `category`, `set`     | `subject`, `object`, `predicate`     | maps       |
//! | 1.1+       | `ids`, `categories`, `is_set` | `subject`, `object`, `predicates`  | maps       |
//!
//! Container encoding is decided once per graph ([`WireEntries`]); field names
//! are migrated per node/edge by a chain of single-generation steps, each of
//! which only renames a field when the old name is present and the new one
//! is not.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::error::TrapiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrapiVersion {
    V0_9,
    V1_0,
    /// 1.1 and later share the plural field names.
    V1_1,
}

impl TrapiVersion {
    pub const CURRENT: TrapiVersion = TrapiVersion::V1_1;

    /// Guess the generation of a single node from its field names.
    pub fn detect_node(node: &Map<String, Value>) -> Self {
        if node.contains_key("curie") || node.contains_key("type") {
            TrapiVersion::V0_9
        } else if node.contains_key("id") || node.contains_key("category") {
            TrapiVersion::V1_0
        } else {
            TrapiVersion::V1_1
        }
    }

    /// Guess the generation of a single edge from its field names.
    pub fn detect_edge(edge: &Map<String, Value>) -> Self {
        if edge.contains_key("source_id") || edge.contains_key("target_id") {
            TrapiVersion::V0_9
        } else if edge.contains_key("predicate") {
            TrapiVersion::V1_0
        } else {
            TrapiVersion::V1_1
        }
    }
}

impl FromStr for TrapiVersion {
    type Err = TrapiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('v');
        let mut parts = trimmed.split('.');
        let major = parts.next().and_then(|p| p.parse::<u32>().ok());
        let minor = parts.next().and_then(|p| p.parse::<u32>().ok());
        match (major, minor) {
            (Some(0), Some(9)) => Ok(TrapiVersion::V0_9),
            (Some(1), Some(0)) => Ok(TrapiVersion::V1_0),
            (Some(1), Some(_)) => Ok(TrapiVersion::V1_1),
            _ => Err(TrapiError::UnknownVersion(s.to_string())),
        }
    }
}

// ============================================================================
// Migration steps
// ============================================================================

type Step = fn(&mut Map<String, Value>);

/// Node steps, each tagged with the generation it upgrades *from*.
const NODE_STEPS: [(TrapiVersion, Step); 2] = [
    (TrapiVersion::V0_9, node_v0_9_to_v1_0),
    (TrapiVersion::V1_0, node_v1_0_to_v1_1),
];

const EDGE_STEPS: [(TrapiVersion, Step); 2] = [
    (TrapiVersion::V0_9, edge_v0_9_to_v1_0),
    (TrapiVersion::V1_0, edge_v1_0_to_v1_1),
];

fn rename(map: &mut Map<String, Value>, old: &str, new: &str) {
    if let Some(value) = map.remove(old) {
        if !map.contains_key(new) {
            map.insert(new.to_string(), value);
        }
    }
}

fn node_v0_9_to_v1_0(node: &mut Map<String, Value>) {
    rename(node, "curie", "id");
    rename(node, "type", "category");
}

fn node_v1_0_to_v1_1(node: &mut Map<String, Value>) {
    rename(node, "id", "ids");
    rename(node, "category", "categories");
    rename(node, "set", "is_set");
}

fn edge_v0_9_to_v1_0(edge: &mut Map<String, Value>) {
    rename(edge, "source_id", "subject");
    rename(edge, "target_id", "object");
    rename(edge, "type", "predicate");
}

fn edge_v1_0_to_v1_1(edge: &mut Map<String, Value>) {
    rename(edge, "predicate", "predicates");
}

/// Bring a node up to the current field names, starting at `from`.
pub fn migrate_node(node: &mut Map<String, Value>, from: TrapiVersion) {
    for (generation, step) in NODE_STEPS {
        if generation >= from {
            step(node);
        }
    }
}

/// Bring an edge up to the current field names, starting at `from`.
pub fn migrate_edge(edge: &mut Map<String, Value>, from: TrapiVersion) {
    for (generation, step) in EDGE_STEPS {
        if generation >= from {
            step(edge);
        }
    }
}

// ============================================================================
// Container encoding
// ============================================================================

/// How a `nodes` or `edges` container arrived on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum WireEntries {
    /// Current TRAPI: an object keyed by id.
    Keyed(Map<String, Value>),
    /// Legacy list representation: each entry carries its own `id`.
    Listed(Vec<Value>),
    /// Absent, null, or a scalar. Treated as empty.
    Missing,
}

impl WireEntries {
    pub fn classify(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(map)) => WireEntries::Keyed(map.clone()),
            Some(Value::Array(list)) => WireEntries::Listed(list.clone()),
            _ => WireEntries::Missing,
        }
    }

    /// Flatten into `(id, properties)` pairs in wire order.
    ///
    /// Listed entries lose their `id` property; entries without a usable id
    /// get `<prefix><index>`. Non-object values become empty property maps.
    pub fn into_entries(self, prefix: &str) -> Vec<(String, Map<String, Value>)> {
        match self {
            WireEntries::Keyed(map) => map
                .into_iter()
                .map(|(id, value)| (id, into_object(value)))
                .collect(),
            WireEntries::Listed(list) => {
                let mut entries: Vec<(String, Map<String, Value>)> = Vec::with_capacity(list.len());
                for (index, value) in list.into_iter().enumerate() {
                    let mut props = into_object(value);
                    let id = match props.remove("id") {
                        Some(Value::String(s)) if !s.is_empty() => s,
                        Some(Value::Number(n)) => n.to_string(),
                        _ => generated_id(prefix, index, &entries),
                    };
                    entries.push((id, props));
                }
                entries
            }
            WireEntries::Missing => Vec::new(),
        }
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn generated_id(prefix: &str, index: usize, taken: &[(String, Map<String, Value>)]) -> String {
    let mut n = index;
    loop {
        let candidate = format!("{prefix}{n}");
        if !taken.iter().any(|(id, _)| *id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// A raw query graph with its container encoding resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct WireGraph {
    pub nodes: WireEntries,
    pub edges: WireEntries,
}

impl WireGraph {
    pub fn from_value(raw: &Value) -> Self {
        Self {
            nodes: WireEntries::classify(raw.get("nodes")),
            edges: WireEntries::classify(raw.get("edges")),
        }
    }

    pub fn is_listed(&self) -> bool {
        matches!(self.nodes, WireEntries::Listed(_)) || matches!(self.edges, WireEntries::Listed(_))
    }
}

// ============================================================================
// Scalar → sequence coercion
// ============================================================================

/// Coerce a list-valued field: string → `[s]`, list → copy, null → `None`.
///
/// Anything else is a caller error.
pub fn coerce_to_sequence(field: &str, value: Value) -> Result<Option<Vec<String>>, TrapiError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(vec![s])),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(TrapiError::Coercion {
                    field: field.to_string(),
                    found: crate::error::json_kind(&other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        other => Err(TrapiError::Coercion {
            field: field.to_string(),
            found: crate::error::json_kind(&other),
        }),
    }
}
