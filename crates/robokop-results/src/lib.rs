//! Answer presentation for ROBOKOP.
//!
//! Turns a normalized TRAPI [`Message`](robokop_trapi::Message) into what the
//! answer page shows: averaged and sorted result scores, result table columns
//! and cells, the sub-graph of a selected result, and the per-node overview.
//! Category ranking and colors come from a
//! [`CategoryStyle`](robokop_biolink::CategoryStyle), usually the loaded
//! Biolink model.

pub mod display;
pub mod explorer;
pub mod scores;
pub mod table;

pub use display::{make_display_nodes, DisplayNode};
pub use explorer::{needs_prune_slider, select_result, ExplorerEdge, ExplorerNode, SelectedResult};
pub use scores::{average_analyses_scores, average_score, sort_by_score};
pub use table::{format_score, make_table_headers, make_table_rows, ColumnKind, ColumnSpec, SortOrder};
