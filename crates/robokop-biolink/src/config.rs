//! Display configuration.
//!
//! Loaded from JSON by the CLI; every field is optional and falls back to the
//! built-in values.

use serde::{Deserialize, Serialize};

use robokop_trapi::IdMap;

use crate::color::{ColorTable, UNDEFINED_COLOR};
use crate::error::BiolinkError;

/// Root class a category must descend from to be offered as a concept.
pub const DEFAULT_BASE_CLASS: &str = "biolink:NamedThing";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub base_class: String,
    pub undefined_color: String,
    /// Extra or replacement colors, keyed by category CURIE.
    pub category_colors: IdMap<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            base_class: DEFAULT_BASE_CLASS.to_string(),
            undefined_color: UNDEFINED_COLOR.to_string(),
            category_colors: IdMap::new(),
        }
    }
}

impl StyleConfig {
    pub fn from_json_str(text: &str) -> Result<Self, BiolinkError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn color_table(&self) -> ColorTable {
        ColorTable::with_overrides(
            self.category_colors
                .iter()
                .map(|(class, color)| (class, color.as_str())),
            &self.undefined_color,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(StyleConfig::from_json_str("{}").unwrap(), StyleConfig::default());
    }

    #[test]
    fn overrides_flow_into_color_table() {
        let config = StyleConfig::from_json_str(
            r##"{"undefined_color": "#000000", "category_colors": {"biolink:Gene": "#123456"}}"##,
        )
        .unwrap();
        assert_eq!(config.base_class, DEFAULT_BASE_CLASS);
        let table = config.color_table();
        assert_eq!(table.get("biolink:Gene"), Some("#123456"));
        assert_eq!(table.undefined(), "#000000");
    }

    #[test]
    fn wrong_types_are_errors() {
        assert!(StyleConfig::from_json_str(r#"{"base_class": 3}"#).is_err());
    }
}
