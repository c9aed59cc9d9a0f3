//! Memoized Biolink derivation.
//!
//! Deriving hierarchies walks every class for every class, so the result is
//! kept and reused for as long as the same document comes back. Documents
//! are identified by the digest of their JSON serialization.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use robokop_trapi::digest::json_digest;

use crate::config::StyleConfig;
use crate::document::ClassDocument;
use crate::error::BiolinkError;
use crate::model::BiolinkModel;

#[derive(Debug)]
struct Derived {
    digest: String,
    model: Arc<BiolinkModel>,
}

/// Thread-safe holder of the most recently derived [`BiolinkModel`].
#[derive(Debug, Default)]
pub struct BiolinkCache {
    style: StyleConfig,
    derived: RwLock<Option<Derived>>,
}

impl BiolinkCache {
    pub fn new(style: StyleConfig) -> Self {
        Self {
            style,
            derived: RwLock::new(None),
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Model for `document`, recomputed only when its digest changed.
    pub fn derive(&self, document: &Value) -> Result<Arc<BiolinkModel>, BiolinkError> {
        let digest = json_digest(document);

        if let Some(derived) = self.derived.read().as_ref() {
            if derived.digest == digest {
                tracing::debug!(digest = %digest, "biolink cache hit");
                return Ok(Arc::clone(&derived.model));
            }
        }

        tracing::debug!(digest = %digest, "biolink cache miss, deriving model");
        let doc = ClassDocument::from_value(document)?;
        let model = Arc::new(BiolinkModel::from_document(&doc, &self.style));
        *self.derived.write() = Some(Derived {
            digest,
            model: Arc::clone(&model),
        });
        Ok(model)
    }

    /// Digest of the document the cached model came from.
    pub fn current_digest(&self) -> Option<String> {
        self.derived.read().as_ref().map(|d| d.digest.clone())
    }

    /// Cached model, or the empty model when nothing has been derived.
    pub fn current(&self) -> Arc<BiolinkModel> {
        match self.derived.read().as_ref() {
            Some(derived) => Arc::clone(&derived.model),
            None => Arc::new(BiolinkModel::empty()),
        }
    }

    pub fn invalidate(&self) {
        if self.derived.write().take().is_some() {
            tracing::debug!("biolink cache invalidated");
        }
    }
}
