//! The in-memory catalog and its lookups.

use std::path::Path;

use crate::compose::{compose, Explanation, MISSING_ANALOGY};
use crate::error::DatasetError;
use crate::leveling::{compute_level, XpGain};
use crate::model::{
    AnalogyRecord, ConceptDefinition, DialectTemplateSet, GamificationTable, Xp,
};

/// All four datasets, loaded once and read-only afterwards.
///
/// Share it between request handlers behind an `Arc`; no method takes
/// `&mut self`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    definitions: Vec<ConceptDefinition>,
    analogies: Vec<AnalogyRecord>,
    dialects: DialectTemplateSet,
    gamification: GamificationTable,
}

impl Catalog {
    pub fn new(
        definitions: Vec<ConceptDefinition>,
        analogies: Vec<AnalogyRecord>,
        dialects: DialectTemplateSet,
        gamification: GamificationTable,
    ) -> Self {
        Self {
            definitions,
            analogies,
            dialects,
            gamification,
        }
    }

    /// Load the four dataset files from `dir`.
    pub fn load(dir: &Path) -> Result<Self, DatasetError> {
        crate::dataset::load_catalog(dir)
    }

    pub fn definitions(&self) -> &[ConceptDefinition] {
        &self.definitions
    }

    pub fn analogies(&self) -> &[AnalogyRecord] {
        &self.analogies
    }

    pub fn dialects(&self) -> &DialectTemplateSet {
        &self.dialects
    }

    pub fn gamification(&self) -> &GamificationTable {
        &self.gamification
    }

    /// First definition whose id matches.
    pub fn find_definition(&self, concept_id: &str) -> Option<&ConceptDefinition> {
        self.definitions.iter().find(|d| d.id == concept_id)
    }

    /// Analogy text for a persona, taken from the first record for the concept.
    ///
    /// Later records for the same concept are never consulted, even when the
    /// first one lacks the persona. Empty text counts as missing.
    pub fn find_analogy(&self, concept_id: &str, persona: &str) -> Option<&str> {
        self.analogies
            .iter()
            .find(|a| a.concept_id == concept_id)?
            .analogy(persona)
            .filter(|text| !text.is_empty())
    }

    /// The phrasing pattern for a dialect.
    pub fn find_template(&self, dialect: &str) -> Option<&str> {
        self.dialects
            .templates
            .get(dialect)?
            .simple_pattern
            .as_deref()
    }

    /// Compose the explanation for a concept, or `None` if the concept is
    /// unknown. A missing analogy or dialect falls back rather than failing.
    pub fn explain(&self, concept_id: &str, persona: &str, dialect: &str) -> Option<Explanation> {
        let definition = &self.find_definition(concept_id)?.definition;
        let analogy = self
            .find_analogy(concept_id, persona)
            .unwrap_or(MISSING_ANALOGY);
        let dialect_output = compose(self.find_template(dialect), definition, analogy);

        Some(Explanation {
            definition: definition.clone(),
            analogy: analogy.to_string(),
            dialect_output,
        })
    }

    /// Add XP and compute the level against this catalog's threshold table.
    pub fn gain_xp(&self, current_xp: Xp, xp_to_add: Xp) -> XpGain {
        compute_level(&self.gamification.levels, current_xp, xp_to_add)
    }
}
