use chrono::Utc;
use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use robokop_trapi::IdMap;

use crate::document::{Document, DocumentId};
use crate::error::StoreError;

/// Question and answer storage, shaped after the Robokache routes.
///
/// Documents form a two-level tree: questions have no parent, answers point
/// at their question. Each document may carry one JSON payload.
pub trait DocumentStore: Send + Sync {
    /// Store a new document and return its assigned id.
    fn create(&self, document: Document) -> Result<DocumentId, StoreError>;

    fn get(&self, id: &str) -> Result<Document, StoreError>;

    /// Replace the metadata of an existing document.
    fn put(&self, document: Document) -> Result<(), StoreError>;

    /// Delete a document, its payload and all of its children.
    fn delete(&self, id: &str) -> Result<(), StoreError>;

    fn children(&self, parent: &str) -> Result<Vec<Document>, StoreError>;

    /// Documents without a parent.
    fn roots(&self) -> Result<Vec<Document>, StoreError>;

    fn data(&self, id: &str) -> Result<Value, StoreError>;

    fn set_data(&self, id: &str, data: Value) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
struct Entry {
    document: Document,
    data: Option<Value>,
}

/// Process-local [`DocumentStore`]. Listing follows creation order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<IdMap<Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn collect(&self, keep: impl Fn(&Document) -> bool) -> Vec<Document> {
        self.entries
            .read()
            .values()
            .filter(|entry| keep(&entry.document))
            .map(|entry| entry.document.clone())
            .collect()
    }
}

impl DocumentStore for MemoryStore {
    fn create(&self, mut document: Document) -> Result<DocumentId, StoreError> {
        let mut entries = self.entries.write();
        if document.has_parent() && !entries.contains_key(&document.parent) {
            return Err(StoreError::MissingParent(document.parent));
        }
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        document.id = id.clone();
        document.created_at = Some(now);
        document.updated_at = Some(now);
        tracing::debug!(id = %id, parent = %document.parent, "created document");
        entries.insert(id.clone(), Entry { document, data: None });
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Document, StoreError> {
        self.entries
            .read()
            .get(id)
            .map(|entry| entry.document.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn put(&self, mut document: Document) -> Result<(), StoreError> {
        let mut entries = self.entries.write();
        if document.has_parent() && !entries.contains_key(&document.parent) {
            return Err(StoreError::MissingParent(document.parent));
        }
        let entry = entries
            .get_mut(&document.id)
            .ok_or_else(|| StoreError::NotFound(document.id.clone()))?;
        document.created_at = entry.document.created_at;
        document.updated_at = Some(Utc::now());
        tracing::debug!(id = %document.id, "updated document");
        entry.document = document;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write();
        if entries.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let before = entries.len();
        entries.retain(|_, entry| entry.document.parent != id);
        tracing::debug!(id = %id, children = before - entries.len(), "deleted document");
        Ok(())
    }

    fn children(&self, parent: &str) -> Result<Vec<Document>, StoreError> {
        if !self.entries.read().contains_key(parent) {
            return Err(StoreError::NotFound(parent.to_string()));
        }
        Ok(self.collect(|document| document.parent == parent))
    }

    fn roots(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.collect(|document| !document.has_parent()))
    }

    fn data(&self, id: &str) -> Result<Value, StoreError> {
        let entries = self.entries.read();
        let entry = entries
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entry
            .data
            .clone()
            .ok_or_else(|| StoreError::MissingData(id.to_string()))
    }

    fn set_data(&self, id: &str, data: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entry.data = Some(data);
        entry.document.updated_at = Some(Utc::now());
        tracing::debug!(id = %id, "stored document data");
        Ok(())
    }
}
