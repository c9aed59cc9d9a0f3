//! Question and answer documents for ROBOKOP.
//!
//! Mirrors the Robokache document model: questions at the top level,
//! answers as their children, each with an optional TRAPI payload.
//! [`MemoryStore`] is the in-process backend; the helpers in [`message`]
//! handle saving query graphs and loading validated messages.

pub mod document;
pub mod error;
pub mod memory;
pub mod message;

pub use document::{default_answer, default_question, Document, DocumentId, DocumentMetadata, Visibility};
pub use error::StoreError;
pub use memory::{DocumentStore, MemoryStore};
pub use message::{create_question, load_message, save_query_graph, upload_answer, LoadedMessage};
