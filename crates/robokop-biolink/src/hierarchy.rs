//! Class hierarchies derived from the Biolink document.
//!
//! All walks work on the document's prose names and convert to CURIEs at the
//! end. `is_a` is meant to be a tree; cycles are tolerated by stopping at the
//! first repeated class.

use std::collections::HashSet;

use robokop_trapi::strings::node_from_biolink;
use robokop_trapi::IdMap;

use crate::document::ClassDocument;

/// CURIE → related classes as CURIEs.
pub type ClassMap = IdMap<Vec<String>>;

/// Direct mixins of `class`. Mixins of mixins are not followed.
pub fn collect_mixins(doc: &ClassDocument, class: &str) -> Vec<String> {
    doc.class(class)
        .map(|def| def.mixins.clone())
        .unwrap_or_default()
}

/// Walk `is_a` upwards from `class`, emitting each ancestor followed by its
/// mixins. `class` itself is not included.
pub fn ancestors(doc: &ClassDocument, class: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen: HashSet<&str> = HashSet::from([class]);
    let mut current = class;
    while let Some(parent) = doc.class(current).and_then(|def| def.is_a.as_deref()) {
        if !seen.insert(parent) {
            tracing::warn!(class = %class, repeated = %parent, "cycle in Biolink is_a chain");
            break;
        }
        out.push(parent.to_string());
        out.extend(collect_mixins(doc, parent));
        current = parent;
    }
    out
}

/// Every class below `class`, in document order: each direct child, then
/// its mixins, then its own descendants.
pub fn descendants(doc: &ClassDocument, class: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut expanded: HashSet<String> = HashSet::from([class.to_string()]);
    collect_descendants(doc, class, &mut expanded, &mut out);
    out
}

fn collect_descendants(
    doc: &ClassDocument,
    parent: &str,
    expanded: &mut HashSet<String>,
    out: &mut Vec<String>,
) {
    for (child, def) in doc.classes.iter() {
        if def.is_a.as_deref() != Some(parent) {
            continue;
        }
        out.push(child.to_string());
        out.extend(def.mixins.iter().cloned());
        if expanded.insert(child.to_string()) {
            collect_descendants(doc, child, expanded, out);
        } else {
            tracing::warn!(class = %child, "cycle in Biolink is_a chain");
        }
    }
}

fn curies(names: impl IntoIterator<Item = String>) -> Vec<String> {
    names.into_iter().map(|name| node_from_biolink(&name)).collect()
}

/// `descendants ++ [class] ++ mixins ++ ancestors` for every class.
pub fn build_hierarchies(doc: &ClassDocument) -> ClassMap {
    doc.classes
        .keys()
        .map(|class| {
            let mut members = descendants(doc, class);
            members.push(class.to_string());
            members.extend(collect_mixins(doc, class));
            members.extend(ancestors(doc, class));
            (node_from_biolink(class), curies(members))
        })
        .collect()
}

/// `[class] ++ mixins ++ ancestors` for every class, most specific first.
pub fn build_ancestors_map(doc: &ClassDocument) -> ClassMap {
    doc.classes
        .keys()
        .map(|class| {
            let mut members = vec![class.to_string()];
            members.extend(collect_mixins(doc, class));
            members.extend(ancestors(doc, class));
            (node_from_biolink(class), curies(members))
        })
        .collect()
}

/// Classes whose hierarchy mentions `base_class`, in document order.
pub fn concepts(hierarchies: &ClassMap, base_class: &str) -> Vec<String> {
    hierarchies
        .iter()
        .filter(|(_, members)| members.iter().any(|m| m == base_class))
        .map(|(class, _)| class.to_string())
        .collect()
}

/// Order categories most specific first: ascending hierarchy length.
///
/// The sort is stable, so equal lengths keep their input order. Categories
/// missing from `hierarchies` count as length 0 and so lead.
pub fn rank_categories(hierarchies: &ClassMap, categories: &[String]) -> Vec<String> {
    let mut ranked: Vec<&String> = categories.iter().collect();
    ranked.sort_by_key(|category| hierarchies.get(category.as_str()).map_or(0, Vec::len));
    ranked.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ClassDocument {
        ClassDocument::from_value(&json!({
            "classes": {
                "named thing": {},
                "biological entity": {"is_a": "named thing"},
                "gene or gene product": {},
                "gene": {"is_a": "biological entity", "mixins": ["gene or gene product"]},
                "disease or phenotypic feature": {"is_a": "biological entity"},
                "disease": {"is_a": "disease or phenotypic feature"},
                "phenotypic feature": {"is_a": "disease or phenotypic feature"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn ancestors_include_mixins_along_the_way() {
        let doc = sample();
        assert_eq!(ancestors(&doc, "gene"), vec!["biological entity", "named thing"]);
        assert_eq!(
            ancestors(&doc, "disease"),
            vec!["disease or phenotypic feature", "biological entity", "named thing"]
        );
        assert!(ancestors(&doc, "unknown").is_empty());
    }

    #[test]
    fn descendants_recurse_depth_first() {
        let doc = sample();
        assert_eq!(
            descendants(&doc, "biological entity"),
            vec![
                "gene",
                "gene or gene product",
                "disease or phenotypic feature",
                "disease",
                "phenotypic feature"
            ]
        );
    }

    #[test]
    fn hierarchy_is_descendants_self_mixins_ancestors() {
        let hierarchies = build_hierarchies(&sample());
        assert_eq!(
            hierarchies.get("biolink:Gene").unwrap(),
            &vec![
                "biolink:Gene".to_string(),
                "biolink:GeneOrGeneProduct".to_string(),
                "biolink:BiologicalEntity".to_string(),
                "biolink:NamedThing".to_string(),
            ]
        );
        let dpf = hierarchies.get("biolink:DiseaseOrPhenotypicFeature").unwrap();
        assert_eq!(dpf[0], "biolink:Disease");
        assert_eq!(dpf[2], "biolink:DiseaseOrPhenotypicFeature");
    }

    #[test]
    fn ancestors_map_starts_with_the_class() {
        let map = build_ancestors_map(&sample());
        assert_eq!(
            map.get("biolink:Disease").unwrap(),
            &vec![
                "biolink:Disease".to_string(),
                "biolink:DiseaseOrPhenotypicFeature".to_string(),
                "biolink:BiologicalEntity".to_string(),
                "biolink:NamedThing".to_string(),
            ]
        );
    }

    #[test]
    fn concepts_are_filtered_by_base_class() {
        let hierarchies = build_hierarchies(&sample());
        let found = concepts(&hierarchies, "biolink:BiologicalEntity");
        assert!(found.contains(&"biolink:Gene".to_string()));
        // Reaches BiologicalEntity only through descendants.
        assert!(found.contains(&"biolink:NamedThing".to_string()));
        assert!(!found.contains(&"biolink:GeneOrGeneProduct".to_string()));
    }

    #[test]
    fn ranking_is_stable_with_unknowns_first() {
        let hierarchies = build_hierarchies(&sample());
        let ranked = rank_categories(
            &hierarchies,
            &[
                "biolink:Unknown".to_string(),
                "biolink:NamedThing".to_string(),
                "biolink:Disease".to_string(),
                "biolink:PhenotypicFeature".to_string(),
            ],
        );
        assert_eq!(
            ranked,
            vec![
                "biolink:Unknown",
                "biolink:Disease",
                "biolink:PhenotypicFeature",
                "biolink:NamedThing"
            ]
        );

        let ranked = rank_categories(
            &hierarchies,
            &["biolink:Gene".to_string(), "biolink:NewThing".to_string()],
        );
        assert_eq!(ranked, vec!["biolink:NewThing", "biolink:Gene"]);
    }

    #[test]
    fn cycles_terminate() {
        let doc = ClassDocument::from_value(&json!({
            "classes": {"a": {"is_a": "b"}, "b": {"is_a": "a"}}
        }))
        .unwrap();
        assert_eq!(ancestors(&doc, "a"), vec!["b"]);
        let hierarchies = build_hierarchies(&doc);
        assert!(hierarchies.get("biolink:A").unwrap().contains(&"biolink:A".to_string()));
    }
}
