//! TRAPI query graph core for ROBOKOP.
//!
//! Reasoners and the document cache hand us "Reasoner Standard" messages in
//! several historical shapes (list-encoded graphs, `curie`/`type` field names,
//! bare strings where lists are expected). This crate turns all of them into
//! one canonical model and provides the pure operations the rest of the
//! application builds on:
//!
//! - [`normalize`]: wire JSON → canonical [`QueryGraph`] (and back, pruned)
//! - [`validate`]: structural checks returning message lists, never errors
//! - [`order`]: root selection and DFS node ordering for result tables
//! - [`builder`]: graph editing operations used by the query builder
//!
//! Everything here is synchronous and side-effect free.

pub mod builder;
pub mod digest;
pub mod error;
pub mod id_map;
pub mod model;
pub mod normalize;
pub mod order;
pub mod strings;
pub mod validate;
pub mod wire;

pub use error::TrapiError;
pub use id_map::IdMap;
pub use model::{
    Analysis, Binding, Graph, KgEdge, KgNode, KnowledgeGraph, Message, QEdge, QNode, QueryGraph,
    TrapiResult,
};
pub use normalize::{normalize, synthesize_name, to_list_representation, to_wire, Normalizer};
pub use order::{find_starting_node, sort_nodes};
pub use wire::TrapiVersion;
