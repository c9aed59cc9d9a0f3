use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrapiError {
    /// A list-valued field held something other than a list, a string or null.
    #[error("{field}: expected array or string, found {found}")]
    Coercion { field: String, found: &'static str },

    #[error("unknown TRAPI version: {0}")]
    UnknownVersion(String),

    #[error("TRAPI document should have a parent property of \"message\"")]
    MissingEnvelope,

    #[error("no query node with id {0:?}")]
    UnknownNode(String),

    #[error("no query edge with id {0:?}")]
    UnknownEdge(String),

    #[error("invalid TRAPI JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Short JSON type name used in error messages.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coercion_message_names_the_field() {
        let e = TrapiError::Coercion {
            field: "categories".into(),
            found: json_kind(&json!(42)),
        };
        let text = e.to_string();
        assert!(text.contains("categories"));
        assert!(text.contains("expected array or string"));
        assert!(text.contains("number"));
    }

    #[test]
    fn json_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: TrapiError = err.into();
        assert!(e.to_string().starts_with("invalid TRAPI JSON"));
    }
}
