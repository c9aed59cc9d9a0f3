//! Result table columns.
//!
//! One column per query node, ordered by a depth-first walk from the root
//! node so that adjacent columns are adjacent in the graph, plus a trailing
//! score column when results are scored.

use serde::Serialize;

use robokop_biolink::CategoryStyle;
use robokop_trapi::normalize::UNNAMED_NODE;
use robokop_trapi::{find_starting_node, sort_nodes, Binding, Message, QNode, TrapiResult};

use crate::scores::has_scores;

pub const SCORE_COLUMN_ID: &str = "score";
pub const SCORE_HEADER: &str = "Score";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    Node { node_id: String },
    Score,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub id: String,
    /// Display name of the column without the node id.
    pub label: String,
    pub header: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub kind: ColumnKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortOrder>,
    /// Noun used for set cells: "Set of <category> [n]".
    #[serde(skip)]
    set_label: String,
}

impl ColumnSpec {
    fn node(node_id: &str, node: &QNode, style: &dyn CategoryStyle) -> Self {
        let category_label = style.category_label(node.categories());
        let label = node_label(node, category_label.as_deref());
        Self {
            id: node_id.to_string(),
            header: format!("{label} ({node_id})"),
            label,
            color: Some(style.color_for(node.categories())),
            kind: ColumnKind::Node {
                node_id: node_id.to_string(),
            },
            default_sort: None,
            set_label: category_label.unwrap_or_else(|| UNNAMED_NODE.to_string()),
        }
    }

    fn score() -> Self {
        Self {
            id: SCORE_COLUMN_ID.to_string(),
            label: SCORE_HEADER.to_string(),
            header: SCORE_HEADER.to_string(),
            color: None,
            kind: ColumnKind::Score,
            default_sort: Some(SortOrder::Descending),
            set_label: String::new(),
        }
    }

    /// The bindings this column shows for `result`. Empty for the score column.
    pub fn bindings<'r>(&self, result: &'r TrapiResult) -> &'r [Binding] {
        match &self.kind {
            ColumnKind::Node { node_id } => result.bindings_for(node_id),
            ColumnKind::Score => &[],
        }
    }

    /// Cell text for `result`.
    pub fn render_cell(&self, message: &Message, result: &TrapiResult) -> String {
        match &self.kind {
            ColumnKind::Score => result.score.map(format_score).unwrap_or_default(),
            ColumnKind::Node { .. } => match self.bindings(result) {
                [] => String::new(),
                [single] => message
                    .kg_node(&single.id)
                    .and_then(|node| node.name.clone())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| single.id.clone()),
                many => format!("Set of {} [{}]", self.set_label, many.len()),
            },
        }
    }
}

/// Column label for a query node: its name, else its ids, else its best
/// category, else a placeholder.
fn node_label(node: &QNode, category_label: Option<&str>) -> String {
    if let Some(name) = node.name.as_deref().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    if node.is_pinned() {
        return node.ids().join(", ");
    }
    category_label.unwrap_or(UNNAMED_NODE).to_string()
}

pub fn format_score(score: f64) -> String {
    format!("{score:.3}")
}

/// Columns for the results table of `message`. Empty when the query graph
/// has no nodes.
pub fn make_table_headers(message: &Message, style: &dyn CategoryStyle) -> Vec<ColumnSpec> {
    let graph = &message.query_graph;
    let Some(start) = find_starting_node(graph) else {
        return Vec::new();
    };

    let mut columns: Vec<ColumnSpec> = sort_nodes(graph, &start)
        .iter()
        .filter_map(|node_id| {
            graph
                .nodes
                .get(node_id)
                .map(|node| ColumnSpec::node(node_id, node, style))
        })
        .collect();

    if has_scores(message.results()) {
        columns.push(ColumnSpec::score());
    }
    columns
}

/// Rendered cells, one row per result in message order.
pub fn make_table_rows(message: &Message, columns: &[ColumnSpec]) -> Vec<Vec<String>> {
    message
        .results()
        .iter()
        .map(|result| {
            columns
                .iter()
                .map(|column| column.render_cell(message, result))
                .collect()
        })
        .collect()
}
