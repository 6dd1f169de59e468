//! JSON dataset loader.
//!
//! Loads the four dataset files from a directory, and checks a loaded
//! catalog for integrity problems the lookups silently tolerate.

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::catalog::Catalog;
use crate::compose::{ANALOGY_PLACEHOLDER, DEFINITION_PLACEHOLDER};
use crate::error::DatasetError;
use crate::model::ANALOGY_PREFIX;

/// Concept definitions file name.
pub const DEFINITIONS_FILE: &str = "class1_definitions.json";
/// Analogy records file name.
pub const ANALOGIES_FILE: &str = "class1_analogies.json";
/// Dialect templates file name.
pub const DIALECTS_FILE: &str = "dialect_templates.json";
/// Gamification table file name.
pub const GAMIFICATION_FILE: &str = "gamification.json";

/// Read and deserialize one JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load all four datasets from `dir`. Any missing or malformed file fails
/// the whole load.
pub fn load_catalog(dir: &Path) -> Result<Catalog, DatasetError> {
    let definitions: Vec<_> = load_json(&dir.join(DEFINITIONS_FILE))?;
    let analogies: Vec<_> = load_json(&dir.join(ANALOGIES_FILE))?;
    let dialects = load_json(&dir.join(DIALECTS_FILE))?;
    let gamification = load_json(&dir.join(GAMIFICATION_FILE))?;

    let catalog = Catalog::new(definitions, analogies, dialects, gamification);
    tracing::debug!(
        dir = %dir.display(),
        definitions = catalog.definitions().len(),
        analogies = catalog.analogies().len(),
        dialects = catalog.dialects().templates.len(),
        levels = catalog.gamification().levels.len(),
        "loaded datasets"
    );

    Ok(catalog)
}

/// A warning from catalog validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// The concept, dialect or level the warning is about (if applicable).
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn about(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            message: message.into(),
        }
    }
}

/// Check a catalog for common data issues.
///
/// None of these stop the server; lookups fall back or report not found.
/// They usually point at a typo in a dataset file.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate concept ids shadow later definitions
    let mut seen_ids = HashSet::new();
    for def in catalog.definitions() {
        if !seen_ids.insert(def.id.as_str()) {
            warnings.push(ValidationWarning::about(
                &def.id,
                format!("duplicate concept ID: {}", def.id),
            ));
        }
    }

    let mut analogy_ids = HashSet::new();
    for record in catalog.analogies() {
        if !seen_ids.contains(record.concept_id.as_str()) {
            warnings.push(ValidationWarning::about(
                &record.concept_id,
                "analogy record refers to an unknown concept",
            ));
        }
        if !analogy_ids.insert(record.concept_id.as_str()) {
            warnings.push(ValidationWarning::about(
                &record.concept_id,
                "duplicate analogy record, only the first is used",
            ));
        }
        if record.personas.is_empty() {
            warnings.push(ValidationWarning::about(
                &record.concept_id,
                "analogy record has no analogy_<persona> fields",
            ));
        }
        for (key, value) in &record.extra {
            if key.starts_with(ANALOGY_PREFIX) {
                warnings.push(ValidationWarning::about(
                    &record.concept_id,
                    format!("{key} is not a usable persona analogy, got {value}"),
                ));
            }
        }
    }

    for def in catalog.definitions() {
        if !analogy_ids.contains(def.id.as_str()) {
            warnings.push(ValidationWarning::about(&def.id, "concept has no analogies"));
        }
    }

    for (dialect, template) in &catalog.dialects().templates {
        match template.simple_pattern.as_deref() {
            None | Some("") => warnings.push(ValidationWarning::about(
                dialect,
                "dialect has no simple_pattern, the default pattern will be used",
            )),
            Some(pattern) => {
                for placeholder in [DEFINITION_PLACEHOLDER, ANALOGY_PLACEHOLDER] {
                    if !pattern.contains(placeholder) {
                        warnings.push(ValidationWarning::about(
                            dialect,
                            format!("simple_pattern is missing {placeholder}"),
                        ));
                    }
                }
            }
        }
    }

    let levels = &catalog.gamification().levels;
    if levels.is_empty() {
        warnings.push(ValidationWarning {
            subject: None,
            message: "gamification table has no levels, everyone stays at level 1".into(),
        });
    }
    if levels
        .windows(2)
        .any(|pair| pair[0].xp_required > pair[1].xp_required)
    {
        warnings.push(ValidationWarning {
            subject: None,
            message: "levels are not sorted by xp_required, the last qualifying entry wins".into(),
        });
    }
    let mut seen_levels = HashSet::new();
    for threshold in levels {
        if !seen_levels.insert(threshold.level) {
            warnings.push(ValidationWarning::about(
                threshold.level.to_string(),
                format!("duplicate level: {}", threshold.level),
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_datasets(dir: &Path) {
        let files = [
            (
                DEFINITIONS_FILE,
                json!([{"id": "c1", "definition": "X", "topic": "Plants"}]),
            ),
            (
                ANALOGIES_FILE,
                json!([{"concept_id": "c1", "analogy_farmer": "Y"}]),
            ),
            (
                DIALECTS_FILE,
                json!({"templates": {"bhojpuri": {"simple_pattern": "{definition_simplified} jaise {analogy}"}}}),
            ),
            (
                GAMIFICATION_FILE,
                json!({"levels": [{"level": 1, "xp_required": 0}, {"level": 2, "xp_required": 50}]}),
            ),
        ];
        for (name, value) in files {
            std::fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
        }
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_datasets(dir.path());

        let catalog = load_catalog(dir.path()).unwrap();
        assert_eq!(catalog.definitions().len(), 1);
        assert_eq!(catalog.find_analogy("c1", "farmer"), Some("Y"));
        assert_eq!(catalog.gamification().levels.len(), 2);
        assert!(validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        write_datasets(dir.path());
        std::fs::remove_file(dir.path().join(GAMIFICATION_FILE)).unwrap();

        let err = load_catalog(dir.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.path().ends_with(GAMIFICATION_FILE));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_datasets(dir.path());
        std::fs::write(dir.path().join(ANALOGIES_FILE), "[{\"concept_id\": ").unwrap();

        let err = load_catalog(dir.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Parse { .. }));
        assert!(err.to_string().contains(ANALOGIES_FILE));
    }

    #[test]
    fn wrong_shape_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_datasets(dir.path());
        std::fs::write(dir.path().join(DEFINITIONS_FILE), "{\"id\": \"c1\"}").unwrap();

        assert!(matches!(
            load_catalog(dir.path()),
            Err(DatasetError::Parse { .. })
        ));
    }

    #[test]
    fn validate_reports_data_issues() {
        let definitions = serde_json::from_value(json!([
            {"id": "c1", "definition": "X"},
            {"id": "c1", "definition": "again"},
            {"id": "c2", "definition": "lonely"},
            {"id": "c3", "definition": "numbered"}
        ]))
        .unwrap();
        let analogies = serde_json::from_value(json!([
            {"concept_id": "c1", "analogy_farmer": "Y"},
            {"concept_id": "c9", "analogy_farmer": "Z"},
            {"concept_id": "c3", "analogy_farmer": "W", "analogy_homemaker": 7}
        ]))
        .unwrap();
        let dialects = serde_json::from_value(json!({
            "templates": {
                "bhojpuri": {"simple_pattern": "{definition_simplified} only"},
                "maithili": {}
            }
        }))
        .unwrap();
        let gamification = serde_json::from_value(json!({
            "levels": [
                {"level": 2, "xp_required": 50},
                {"level": 2, "xp_required": 0}
            ]
        }))
        .unwrap();
        let catalog = Catalog::new(definitions, analogies, dialects, gamification);

        let warnings = validate_catalog(&catalog);
        let has = |needle: &str| warnings.iter().any(|w| w.message.contains(needle));
        assert!(has("duplicate concept ID"));
        assert!(has("unknown concept"));
        assert!(has("concept has no analogies"));
        assert!(has("missing {analogy}"));
        assert!(has("no simple_pattern"));
        assert!(has("not sorted"));
        assert!(has("duplicate level"));

        let bad_persona = warnings
            .iter()
            .find(|w| w.message.starts_with("analogy_homemaker"))
            .unwrap();
        assert_eq!(bad_persona.subject.as_deref(), Some("c3"));
        assert!(bad_persona.message.contains("got 7"));
    }
}
