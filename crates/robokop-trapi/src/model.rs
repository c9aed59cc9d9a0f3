//! Canonical TRAPI model.
//!
//! These are the shapes the rest of the application relies on after
//! normalization: id-keyed node/edge maps, list-valued `ids`, `categories`
//! and `predicates`. Properties we do not interpret (constraints, attributes,
//! option flags) are carried in `extra` so saving a graph does not drop them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

use crate::error::TrapiError;
use crate::id_map::IdMap;
use crate::normalize::{normalize, to_wire};
use crate::wire::TrapiVersion;

pub type NodeId = String;
pub type EdgeId = String;

// ============================================================================
// Graphs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "N: Serialize, E: Serialize",
    deserialize = "N: Deserialize<'de>, E: Deserialize<'de>"
))]
pub struct Graph<N, E> {
    #[serde(default)]
    pub nodes: IdMap<N>,
    #[serde(default)]
    pub edges: IdMap<E>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self {
            nodes: IdMap::new(),
            edges: IdMap::new(),
        }
    }
}

pub type QueryGraph = Graph<QNode, QEdge>;
pub type KnowledgeGraph = Graph<KgNode, KgEdge>;

/// A query graph node: an entity slot, optionally pinned to concrete CURIEs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_set: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QNode {
    /// A node is pinned when it names at least one concrete CURIE.
    pub fn is_pinned(&self) -> bool {
        self.ids.as_ref().is_some_and(|ids| !ids.is_empty())
    }

    pub fn ids(&self) -> &[String] {
        self.ids.as_deref().unwrap_or(&[])
    }

    pub fn categories(&self) -> &[String] {
        self.categories.as_deref().unwrap_or(&[])
    }

    pub fn is_set(&self) -> bool {
        self.is_set.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QEdge {
    #[serde(default)]
    pub subject: NodeId,
    #[serde(default)]
    pub object: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicates: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QEdge {
    pub fn new(subject: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            object: object.into(),
            ..Self::default()
        }
    }

    pub fn predicates(&self) -> &[String] {
        self.predicates.as_deref().unwrap_or(&[])
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.subject == node_id || self.object == node_id
    }

    /// The endpoint opposite `node_id`, if this edge touches it.
    pub fn other_end(&self, node_id: &str) -> Option<&str> {
        if self.subject == node_id {
            Some(&self.object)
        } else if self.object == node_id {
            Some(&self.subject)
        } else {
            None
        }
    }
}

impl QueryGraph {
    /// Edges touching `node_id`, in insertion order.
    pub fn incident_edges<'a>(
        &'a self,
        node_id: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a QEdge)> + 'a {
        self.edges.iter().filter(move |(_, e)| e.touches(node_id))
    }

    /// Edge endpoints at `node_id`. A self-loop counts twice.
    pub fn degree(&self, node_id: &str) -> usize {
        self.edges
            .values()
            .map(|e| usize::from(e.subject == node_id) + usize::from(e.object == node_id))
            .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KgNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub categories: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KgNode {
    pub fn categories(&self) -> &[String] {
        self.categories.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KgEdge {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Results
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Binding {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub edge_bindings: IdMap<Vec<Binding>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrapiResult {
    #[serde(default)]
    pub node_bindings: IdMap<Vec<Binding>>,
    #[serde(default)]
    pub analyses: Vec<Analysis>,
    /// Result-level score, usually the mean of the analysis scores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrapiResult {
    pub fn bindings_for(&self, node_id: &str) -> &[Binding] {
        self.node_bindings
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ============================================================================
// Message
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub query_graph: QueryGraph,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_graph: Option<KnowledgeGraph>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<TrapiResult>>,
}

impl Message {
    /// Load from a `{ "message": { ... } }` document.
    pub fn from_envelope(document: &Value) -> Result<Self, TrapiError> {
        let inner = document
            .get("message")
            .ok_or(TrapiError::MissingEnvelope)?;
        Self::from_value(inner, None)
    }

    /// Load the inner message object. The query graph goes through the
    /// normalizer; knowledge graph and results must already be current TRAPI.
    pub fn from_value(inner: &Value, version: Option<TrapiVersion>) -> Result<Self, TrapiError> {
        let query_graph = normalize(inner.get("query_graph").unwrap_or(&Value::Null), version)?;
        let knowledge_graph = match inner.get("knowledge_graph") {
            None | Some(Value::Null) => None,
            Some(kg) => Some(serde_json::from_value(kg.clone())?),
        };
        let results = match inner.get("results") {
            None | Some(Value::Null) => None,
            Some(results) => Some(serde_json::from_value(results.clone())?),
        };
        Ok(Self {
            query_graph,
            knowledge_graph,
            results,
        })
    }

    /// Wire form for saving: pruned query graph wrapped in `message`.
    pub fn to_envelope(&self) -> Value {
        let mut inner = Map::new();
        inner.insert("query_graph".into(), to_wire(&self.query_graph));
        if let Some(kg) = &self.knowledge_graph {
            inner.insert("knowledge_graph".into(), json!(kg));
        }
        if let Some(results) = &self.results {
            inner.insert("results".into(), json!(results));
        }
        json!({ "message": Value::Object(inner) })
    }

    pub fn results(&self) -> &[TrapiResult] {
        self.results.as_deref().unwrap_or(&[])
    }

    pub fn kg_node(&self, id: &str) -> Option<&KgNode> {
        self.knowledge_graph.as_ref()?.nodes.get(id)
    }

    pub fn kg_edge(&self, id: &str) -> Option<&KgEdge> {
        self.knowledge_graph.as_ref()?.edges.get(id)
    }
}

/// Accept a bare string where a list of strings is expected.
fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<String>>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => None,
        Some(OneOrMany::One(s)) => Some(vec![s]),
        Some(OneOrMany::Many(v)) => Some(v),
    })
}
