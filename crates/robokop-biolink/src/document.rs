//! The Biolink class/slot document.
//!
//! Only the parts the resolver needs are typed: `is_a`, `mixins`, and the
//! slot `domain`/`range`. Class and slot names stay in the document's prose
//! form (`"gene or gene product"`); conversion to CURIEs happens on output.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use robokop_trapi::error::json_kind;
use robokop_trapi::IdMap;

use crate::error::BiolinkError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassDocument {
    pub classes: IdMap<ClassDef>,
    pub slots: IdMap<SlotDef>,
}

impl ClassDocument {
    /// Read a document already converted to JSON.
    ///
    /// `null` is the not-yet-loaded document and yields an empty one. Entries
    /// with an empty body (`named thing:` in YAML) become default definitions.
    pub fn from_value(value: &Value) -> Result<Self, BiolinkError> {
        let root = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(root) => root,
            other => return Err(BiolinkError::NotAnObject(json_kind(other))),
        };
        Ok(Self {
            classes: section(root, "classes")?,
            slots: section(root, "slots")?,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, BiolinkError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.slots.is_empty()
    }

    pub fn class(&self, name: &str) -> Option<&ClassDef> {
        self.classes.get(name)
    }

    pub fn slot(&self, name: &str) -> Option<&SlotDef> {
        self.slots.get(name)
    }
}

fn section<T>(root: &Map<String, Value>, name: &'static str) -> Result<IdMap<T>, BiolinkError>
where
    T: Default + for<'de> Deserialize<'de>,
{
    let entries = match root.get(name) {
        None | Some(Value::Null) => return Ok(IdMap::new()),
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            return Err(BiolinkError::SectionNotAnObject {
                section: name,
                found: json_kind(other),
            })
        }
    };
    entries
        .iter()
        .map(|(key, body)| {
            let def = match body {
                Value::Object(_) => serde_json::from_value(body.clone())?,
                _ => T::default(),
            };
            Ok((key.clone(), def))
        })
        .collect()
}

/// A list of names; anything that is not a list reads as empty.
fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
