use serde::Serialize;

use robokop_trapi::strings::display_category;

use crate::color::ColorTable;
use crate::config::StyleConfig;
use crate::document::ClassDocument;
use crate::hierarchy::{build_ancestors_map, build_hierarchies, concepts, rank_categories, ClassMap};
use crate::predicates::{edge_predicates, Predicate};

/// How node categories are ordered, colored and labelled for display.
///
/// Table and graph views only need these three answers, so they take a
/// `&dyn CategoryStyle` rather than the whole model.
pub trait CategoryStyle {
    /// Most specific category first.
    fn rank_categories(&self, categories: &[String]) -> Vec<String>;

    /// Background color for a node with `categories`.
    fn color_for(&self, categories: &[String]) -> String;

    /// Human label for the best of `categories`, if there is one.
    fn category_label(&self, categories: &[String]) -> Option<String> {
        self.rank_categories(categories)
            .first()
            .map(|category| display_category(category))
    }
}

/// Everything derived from one Biolink document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiolinkModel {
    pub hierarchies: ClassMap,
    pub ancestors: ClassMap,
    pub concepts: Vec<String>,
    pub predicates: Vec<Predicate>,
    #[serde(skip)]
    pub colors: ColorTable,
}

impl Default for BiolinkModel {
    fn default() -> Self {
        Self::empty()
    }
}

impl BiolinkModel {
    /// The state before a document has been loaded.
    pub fn empty() -> Self {
        Self {
            hierarchies: ClassMap::new(),
            ancestors: ClassMap::new(),
            concepts: Vec::new(),
            predicates: Vec::new(),
            colors: ColorTable::default(),
        }
    }

    pub fn from_document(doc: &ClassDocument, style: &StyleConfig) -> Self {
        let hierarchies = build_hierarchies(doc);
        let concepts = concepts(&hierarchies, &style.base_class);
        Self {
            ancestors: build_ancestors_map(doc),
            predicates: edge_predicates(doc),
            colors: style.color_table(),
            concepts,
            hierarchies,
        }
    }

    pub fn is_loaded(&self) -> bool {
        !self.hierarchies.is_empty()
    }

    pub fn hierarchy(&self, class: &str) -> &[String] {
        self.hierarchies.get(class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_concept(&self, class: &str) -> bool {
        self.concepts.iter().any(|c| c == class)
    }
}

impl CategoryStyle for BiolinkModel {
    fn rank_categories(&self, categories: &[String]) -> Vec<String> {
        rank_categories(&self.hierarchies, categories)
    }

    fn color_for(&self, categories: &[String]) -> String {
        let ranked = self.rank_categories(categories);
        self.colors.color_for(&self.ancestors, &ranked).to_string()
    }
}
