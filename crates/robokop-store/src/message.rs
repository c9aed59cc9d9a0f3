//! TRAPI payloads on top of a [`DocumentStore`].

use serde_json::{json, Value};

use robokop_trapi::validate::validate_message;
use robokop_trapi::{to_wire, Message, QueryGraph};

use crate::document::{default_answer, default_question, Document, DocumentId};
use crate::error::StoreError;
use crate::memory::DocumentStore;

/// A stored message after validation. `message` is `None` when the payload
/// could not be normalized; `issues` says why.
#[derive(Debug, Clone, Default)]
pub struct LoadedMessage {
    pub message: Option<Message>,
    pub issues: Vec<String>,
}

impl LoadedMessage {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty() && self.message.is_some()
    }
}

/// Store the pruned wire form of `graph` as the payload of `id`.
pub fn save_query_graph(
    store: &dyn DocumentStore,
    id: &str,
    graph: &QueryGraph,
) -> Result<(), StoreError> {
    store.set_data(id, json!({ "message": { "query_graph": to_wire(graph) } }))
}

/// Create a question document holding `graph`.
pub fn create_question(
    store: &dyn DocumentStore,
    name: Option<&str>,
    graph: &QueryGraph,
) -> Result<DocumentId, StoreError> {
    let mut question = default_question();
    if let Some(name) = name {
        question.metadata.name = name.to_string();
    }
    let id = store.create(question)?;
    save_query_graph(store, &id, graph)?;
    Ok(id)
}

/// Store an answer document. Uploads that fail message validation are
/// rejected before anything is written.
pub fn upload_answer(
    store: &dyn DocumentStore,
    parent: Option<&str>,
    document: Value,
) -> Result<DocumentId, StoreError> {
    let issues = validate_message(&document);
    if !issues.is_empty() {
        return Err(StoreError::InvalidMessage(issues));
    }
    let answer = Document {
        parent: parent.unwrap_or_default().to_string(),
        ..default_answer()
    };
    let id = store.create(answer)?;
    if let Err(err) = store.set_data(&id, document) {
        // Leave no payload-less answer behind.
        store.delete(&id)?;
        return Err(err);
    }
    Ok(id)
}

/// Load, validate and normalize the payload of `id`. Only store lookups
/// fail; problems with the message itself are reported in `issues`.
pub fn load_message(store: &dyn DocumentStore, id: &str) -> Result<LoadedMessage, StoreError> {
    let data = store.data(id)?;
    let mut issues = validate_message(&data);
    let message = match Message::from_envelope(&data) {
        Ok(message) => Some(message),
        Err(err) => {
            let rendered = err.to_string();
            if !issues.contains(&rendered) {
                issues.push(rendered);
            }
            None
        }
    };
    Ok(LoadedMessage { message, issues })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use robokop_trapi::{QEdge, QNode};

    fn two_hop() -> QueryGraph {
        let mut graph = QueryGraph::default();
        graph.nodes.insert(
            "n0",
            QNode {
                ids: Some(vec!["MONDO:0005148".into()]),
                categories: Some(vec![]),
                ..QNode::default()
            },
        );
        graph.nodes.insert("n1", QNode::default());
        graph.edges.insert("e0", QEdge::new("n0", "n1"));
        graph
    }

    #[test]
    fn saved_question_is_pruned_and_loads_back() {
        let store = MemoryStore::new();
        let id = create_question(&store, Some("Diabetes"), &two_hop()).unwrap();
        assert_eq!(store.get(&id).unwrap().metadata.name, "Diabetes");

        let data = store.data(&id).unwrap();
        assert!(data["message"]["query_graph"]["nodes"]["n0"].get("categories").is_none());

        let loaded = load_message(&store, &id).unwrap();
        assert!(loaded.is_valid(), "{:?}", loaded.issues);
        let message = loaded.message.unwrap();
        assert_eq!(message.query_graph.nodes.len(), 2);
        assert_eq!(message.query_graph.edges.get("e0").unwrap().subject, "n0");
    }

    #[test]
    fn invalid_upload_is_rejected() {
        let store = MemoryStore::new();
        let err = upload_answer(&store, None, json!({"query_graph": {}})).unwrap_err();
        match err {
            StoreError::InvalidMessage(issues) => assert_eq!(
                issues,
                vec!["The uploaded message should have a parent property of \"message\".".to_string()]
            ),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn upload_answer_under_question() {
        let store = MemoryStore::new();
        let question = create_question(&store, None, &two_hop()).unwrap();
        let answer = upload_answer(
            &store,
            Some(&question),
            json!({
                "message": {
                    "query_graph": {"nodes": {"n0": {}}, "edges": {}},
                    "results": [{"node_bindings": {"n0": [{"id": "X:1"}]}, "analyses": []}]
                }
            }),
        )
        .unwrap();
        let stored = store.get(&answer).unwrap();
        assert_eq!(stored.parent, question);
        assert!(stored.metadata.answer_only);
        assert_eq!(load_message(&store, &answer).unwrap().message.unwrap().results().len(), 1);
    }

    #[test]
    fn broken_payload_reports_issues_without_failing() {
        let store = MemoryStore::new();
        let id = store.create(default_question()).unwrap();
        store
            .set_data(&id, json!({"message": {"query_graph": {"nodes": {"n0": {"ids": 5}}, "edges": {}}}}))
            .unwrap();
        let loaded = load_message(&store, &id).unwrap();
        assert!(loaded.message.is_none());
        assert_eq!(loaded.issues.len(), 1);
        assert!(loaded.issues[0].contains("ids"));
    }

    #[test]
    fn missing_payload_is_a_store_error() {
        let store = MemoryStore::new();
        let id = store.create(default_question()).unwrap();
        assert!(matches!(load_message(&store, &id), Err(StoreError::MissingData(_))));
    }
}
