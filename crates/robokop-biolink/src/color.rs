//! Category colors.
//!
//! A node is colored by the most specific class in its ranked categories'
//! ancestry that has an entry in the table.

use robokop_trapi::IdMap;

use crate::hierarchy::ClassMap;

/// Color for nodes whose categories have no colored ancestor.
pub const UNDEFINED_COLOR: &str = "#f2f2f2";

pub const DEFAULT_CATEGORY_COLORS: [(&str, &str); 28] = [
    ("biolink:AnatomicalEntity", "#e5d8bd"),
    ("biolink:BiologicalEntity", "#c1a25a"),
    ("biolink:BiologicalProcess", "#b3cde3"),
    ("biolink:BiologicalProcessOrActivity", "#b3cde3"),
    ("biolink:Cell", "#fddaec"),
    ("biolink:CellularComponent", "#ead6e0"),
    ("biolink:ChemicalEntity", "#8787ff"),
    ("biolink:ChemicalExposure", "#126180"),
    ("biolink:Disease", "#fbb4ae"),
    ("biolink:DiseaseOrPhenotypicFeature", "#fbb4ae"),
    ("biolink:Drug", "#8787ff"),
    ("biolink:EnvironmentalFeature", "#8a9a5b"),
    ("biolink:Food", "#ffa343"),
    ("biolink:Gene", "#ccebc5"),
    ("biolink:GeneFamily", "#68c357"),
    ("biolink:GeneticCondition", "#ffffcc"),
    ("biolink:GrossAnatomicalStructure", "#f1ebe0"),
    ("biolink:LifeStage", "#fe4164"),
    ("biolink:MolecularActivity", "#bae2d1"),
    ("biolink:MolecularEntity", "#a6a6d9"),
    ("biolink:Metabolite", "#cad2b2"),
    ("biolink:OrganismTaxon", "#00b7eb"),
    ("biolink:Pathway", "#decbe4"),
    ("biolink:PhenotypicFeature", "#f56657"),
    ("biolink:PopulationOfIndividualOrganisms", "#dde26a"),
    ("biolink:Protein", "#ccebc5"),
    ("biolink:SequenceVariant", "#00c4e6"),
    ("biolink:SmallMolecule", "#ccebc5"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    colors: IdMap<String>,
    undefined: String,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            colors: DEFAULT_CATEGORY_COLORS
                .iter()
                .map(|(class, color)| (class.to_string(), color.to_string()))
                .collect(),
            undefined: UNDEFINED_COLOR.to_string(),
        }
    }
}

impl ColorTable {
    /// Built-in table with `overrides` applied on top.
    pub fn with_overrides<'a>(
        overrides: impl IntoIterator<Item = (&'a str, &'a str)>,
        undefined: &str,
    ) -> Self {
        let mut table = Self::default();
        for (class, color) in overrides {
            table.colors.insert(class, color.to_string());
        }
        table.undefined = undefined.to_string();
        table
    }

    pub fn get(&self, class: &str) -> Option<&str> {
        self.colors.get(class).map(String::as_str)
    }

    pub fn undefined(&self) -> &str {
        &self.undefined
    }

    /// First colored class found walking each ranked category's ancestry.
    pub fn color_for(&self, ancestors: &ClassMap, ranked: &[String]) -> &str {
        ranked
            .iter()
            .filter_map(|category| ancestors.get(category))
            .flat_map(|lineage| lineage.iter())
            .find_map(|class| self.get(class))
            .unwrap_or(self.undefined.as_str())
    }
}
