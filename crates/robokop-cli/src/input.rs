//! Reading JSON inputs and configuration from disk or stdin.

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use robokop_biolink::{BiolinkCache, BiolinkModel, StyleConfig};

/// Read a JSON document; `-` reads stdin.
pub fn read_json(path: &Path) -> Result<Value> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// The query graph inside an input: `message.query_graph`, a top-level
/// `query_graph`, or the whole document.
pub fn query_graph_of(document: &Value) -> &Value {
    document
        .get("message")
        .and_then(|message| message.get("query_graph"))
        .or_else(|| document.get("query_graph"))
        .unwrap_or(document)
}

pub fn load_style(path: Option<&PathBuf>) -> Result<StyleConfig> {
    let Some(path) = path else {
        return Ok(StyleConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let style = StyleConfig::from_json_str(&text)
        .map_err(|err| anyhow!("invalid config {}: {err}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded style config");
    Ok(style)
}

/// Derive the Biolink model from a class document, or the empty model when
/// no document is given.
pub fn load_biolink(path: Option<&PathBuf>, style: StyleConfig) -> Result<Arc<BiolinkModel>> {
    let Some(path) = path else {
        return Ok(Arc::new(BiolinkModel {
            colors: style.color_table(),
            ..BiolinkModel::empty()
        }));
    };
    let cache = BiolinkCache::new(style);
    let document = read_json(path)?;
    let model = cache
        .derive(&document)
        .map_err(|err| anyhow!("invalid Biolink document {}: {err}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        classes = model.hierarchies.len(),
        predicates = model.predicates.len(),
        "loaded Biolink model"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_graph_lookup_order() {
        let enveloped = json!({"message": {"query_graph": {"nodes": {"a": {}}}}});
        assert_eq!(query_graph_of(&enveloped), &json!({"nodes": {"a": {}}}));

        let bare_message = json!({"query_graph": {"nodes": {"b": {}}}});
        assert_eq!(query_graph_of(&bare_message), &json!({"nodes": {"b": {}}}));

        let graph = json!({"nodes": [], "edges": []});
        assert_eq!(query_graph_of(&graph), &graph);
    }

    #[test]
    fn missing_biolink_is_empty_model() {
        let style = StyleConfig {
            undefined_color: "#000000".into(),
            ..StyleConfig::default()
        };
        let model = load_biolink(None, style).unwrap();
        assert!(!model.is_loaded());
        assert_eq!(model.colors.undefined(), "#000000");
    }
}
