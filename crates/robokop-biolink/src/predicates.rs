use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use robokop_trapi::strings::{edge_from_biolink, node_from_biolink};

use crate::document::{ClassDocument, SlotDef};

/// Root of the predicate slot tree.
pub const RELATED_TO: &str = "related to";

/// Slots offered as predicates although they are not below `related to`.
pub const EXTRA_PREDICATES: [&str; 2] = ["treats", "treats or applied or studied to treat"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub predicate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

impl Predicate {
    fn from_slot(name: &str, slot: &SlotDef) -> Self {
        Self {
            predicate: edge_from_biolink(name),
            domain: slot.domain.as_deref().map(node_from_biolink),
            range: slot.range.as_deref().map(node_from_biolink),
        }
    }
}

/// Name of the slot at the top of `name`'s `is_a` chain.
fn chain_root<'a>(doc: &'a ClassDocument, name: &'a str) -> &'a str {
    let mut seen: HashSet<&str> = HashSet::from([name]);
    let mut current = name;
    while let Some(parent) = doc.slot(current).and_then(|slot| slot.is_a.as_deref()) {
        if !seen.insert(parent) {
            tracing::warn!(slot = %name, repeated = %parent, "cycle in Biolink slot is_a chain");
            break;
        }
        current = parent;
    }
    current
}

/// Every slot descending from `related to`, in document order, followed by
/// the `treats` slots when the document has them.
pub fn edge_predicates(doc: &ClassDocument) -> Vec<Predicate> {
    let mut predicates: Vec<Predicate> = doc
        .slots
        .iter()
        .filter(|(name, _)| chain_root(doc, name) == RELATED_TO)
        .map(|(name, slot)| Predicate::from_slot(name, slot))
        .collect();

    for name in EXTRA_PREDICATES {
        let Some(slot) = doc.slot(name) else {
            continue;
        };
        let predicate = Predicate::from_slot(name, slot);
        if !predicates.iter().any(|p| p.predicate == predicate.predicate) {
            predicates.push(predicate);
        }
    }
    predicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_related_to_descendants_and_treats() {
        let doc = ClassDocument::from_value(&json!({
            "slots": {
                "name": {"domain": "named thing"},
                "related to": {"domain": "named thing", "range": "named thing"},
                "interacts with": {"is_a": "related to"},
                "physically interacts with": {"is_a": "interacts with", "domain": "gene"},
                "treats or applied or studied to treat": {"domain": "chemical entity", "range": "disease"},
                "treats": {"is_a": "treats or applied or studied to treat", "range": "disease"}
            }
        }))
        .unwrap();
        let predicates = edge_predicates(&doc);
        let names: Vec<_> = predicates.iter().map(|p| p.predicate.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "biolink:related_to",
                "biolink:interacts_with",
                "biolink:physically_interacts_with",
                "biolink:treats",
                "biolink:treats_or_applied_or_studied_to_treat",
            ]
        );
        assert_eq!(predicates[0].domain.as_deref(), Some("biolink:NamedThing"));
        assert_eq!(predicates[2].domain.as_deref(), Some("biolink:Gene"));
        assert_eq!(predicates[1].range, None);
    }

    #[test]
    fn dangling_parent_ends_the_chain() {
        let doc = ClassDocument::from_value(&json!({
            "slots": {"orphan": {"is_a": "missing"}, "loop": {"is_a": "loop"}}
        }))
        .unwrap();
        assert!(edge_predicates(&doc).is_empty());
    }
}
