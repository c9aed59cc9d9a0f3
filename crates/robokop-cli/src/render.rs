//! Plain-text rendering of result tables.

use colored::Colorize;

use robokop_results::ColumnSpec;

/// Tab-separated table with a bold header line.
pub fn table_text(columns: &[ColumnSpec], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .map(|column| column.header.bold().to_string())
        .collect();
    out.push_str(&header.join("\t"));
    out.push('\n');
    for row in rows {
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use robokop_biolink::BiolinkModel;
    use robokop_results::make_table_headers;
    use robokop_trapi::Message;
    use serde_json::json;

    #[test]
    fn one_line_per_row_plus_header() {
        colored::control::set_override(false);
        let message = Message::from_envelope(&json!({
            "message": {
                "query_graph": {"nodes": {"n0": {"ids": ["X:1"]}, "n1": {}}, "edges": {"e0": {"subject": "n0", "object": "n1"}}},
                "results": [{"node_bindings": {"n0": [{"id": "X:1"}], "n1": [{"id": "Y:2"}]}, "analyses": []}]
            }
        }))
        .unwrap();
        let columns = make_table_headers(&message, &BiolinkModel::empty());
        let text = table_text(&columns, &[vec!["X:1".into(), "Y:2".into()]]);
        assert_eq!(text, "X:1 (n0)\tSomething (n1)\nX:1\tY:2\n");
    }
}
