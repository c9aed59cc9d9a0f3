//! Biolink naming conventions.
//!
//! The Biolink model document names classes and slots in lower-case prose
//! (`"gene or gene product"`, `"related to"`); TRAPI uses CURIEs
//! (`biolink:GeneOrGeneProduct`, `biolink:related_to`); the UI shows prose
//! again (`"Gene Or Gene Product"`, `"related to"`).

pub const BIOLINK_PREFIX: &str = "biolink:";

fn strip_prefix(curie: &str) -> &str {
    match curie.split_once(':') {
        Some((_, local)) => local,
        None => curie,
    }
}

/// `"gene or gene product"` → `biolink:GeneOrGeneProduct`.
pub fn node_from_biolink(class_name: &str) -> String {
    if class_name.starts_with(BIOLINK_PREFIX) {
        return class_name.to_string();
    }
    let pascal: String = class_name
        .split(|c: char| c == ' ' || c == '_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    format!("{BIOLINK_PREFIX}{pascal}")
}

/// `"related to"` → `biolink:related_to`.
pub fn edge_from_biolink(slot_name: &str) -> String {
    if slot_name.starts_with(BIOLINK_PREFIX) {
        return slot_name.to_string();
    }
    format!("{BIOLINK_PREFIX}{}", slot_name.trim().replace(' ', "_"))
}

/// `biolink:GeneOrGeneProduct` → `"Gene Or Gene Product"`.
///
/// Words break where a lower-case letter or digit meets an upper-case one,
/// and before the last capital of an acronym run (`RNAProduct` → `RNA Product`).
pub fn display_category(category: &str) -> String {
    let local: Vec<char> = strip_prefix(category).chars().collect();
    let mut out = String::with_capacity(local.len() + 4);
    for (i, &c) in local.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = local[i - 1];
            let next_is_lower = local.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push(' ');
            }
        }
        if c == '_' {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

/// `biolink:related_to` → `"related to"`.
pub fn display_predicate(predicate: &str) -> String {
    strip_prefix(predicate).replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_become_curies() {
        assert_eq!(node_from_biolink("gene"), "biolink:Gene");
        assert_eq!(node_from_biolink("gene or gene product"), "biolink:GeneOrGeneProduct");
        assert_eq!(node_from_biolink("RNA product"), "biolink:RNAProduct");
        assert_eq!(node_from_biolink("biolink:Disease"), "biolink:Disease");
    }

    #[test]
    fn slot_names_become_snake_case_curies() {
        assert_eq!(edge_from_biolink("related to"), "biolink:related_to");
        assert_eq!(edge_from_biolink("treats"), "biolink:treats");
    }

    #[test]
    fn categories_display_as_words() {
        assert_eq!(display_category("biolink:Gene"), "Gene");
        assert_eq!(display_category("biolink:GeneOrGeneProduct"), "Gene Or Gene Product");
        assert_eq!(display_category("biolink:RNAProduct"), "RNA Product");
        assert_eq!(display_category("PhenotypicFeature"), "Phenotypic Feature");
    }

    #[test]
    fn predicates_display_as_words() {
        assert_eq!(display_predicate("biolink:related_to"), "related to");
        assert_eq!(display_predicate("treats"), "treats");
    }
}
