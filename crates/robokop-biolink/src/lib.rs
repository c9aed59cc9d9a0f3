//! Biolink model support for ROBOKOP.
//!
//! The Biolink document describes node categories as a single-parent `is_a`
//! tree with optional mixins, and edge predicates as a tree of slots under
//! `related to`. From it we derive:
//!
//! - per-class hierarchies (descendants, self, mixins, ancestors)
//! - per-class ancestor chains used for coloring
//! - the set of concepts offered in the question builder
//! - the predicate list with domain and range
//!
//! An absent document is not an error: [`BiolinkModel::empty`] ranks nothing,
//! colors everything with the undefined color and offers no concepts.

pub mod cache;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod predicates;

pub use cache::BiolinkCache;
pub use color::{ColorTable, UNDEFINED_COLOR};
pub use config::StyleConfig;
pub use document::ClassDocument;
pub use error::BiolinkError;
pub use hierarchy::{build_ancestors_map, build_hierarchies, rank_categories, ClassMap};
pub use model::{BiolinkModel, CategoryStyle};
pub use predicates::{edge_predicates, Predicate};
pub use robokop_trapi::strings::{
    display_category, display_predicate, edge_from_biolink, node_from_biolink,
};
