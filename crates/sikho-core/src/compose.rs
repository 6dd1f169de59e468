//! Explanation composing.
//!
//! Stitches a definition and an analogy into a dialect's phrasing pattern.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the definition text.
pub const DEFINITION_PLACEHOLDER: &str = "{definition_simplified}";
/// Placeholder replaced by the analogy text.
pub const ANALOGY_PLACEHOLDER: &str = "{analogy}";
/// Pattern used when a dialect has no template.
pub const DEFAULT_PATTERN: &str = "{definition_simplified}. {analogy}";
/// Analogy text used when the persona has no analogy for a concept.
pub const MISSING_ANALOGY: &str = "No example available.";

/// A composed explanation for one concept, persona and dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub definition: String,
    pub analogy: String,
    pub dialect_output: String,
}

/// Fill a template with a definition and an analogy.
///
/// A missing or empty template falls back to [`DEFAULT_PATTERN`]. The
/// definition is substituted first and the analogy second, over the
/// already-substituted text, so an `{analogy}` token inside the definition
/// is replaced as well.
pub fn compose(template: Option<&str>, definition: &str, analogy: &str) -> String {
    let template = template
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_PATTERN);

    template
        .replace(DEFINITION_PLACEHOLDER, definition)
        .replace(ANALOGY_PLACEHOLDER, analogy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_template_uses_default() {
        assert_eq!(compose(None, "D", "A"), "D. A");
        assert_eq!(compose(Some(""), "D", "A"), "D. A");
    }

    #[test]
    fn placeholders_can_appear_in_any_order() {
        assert_eq!(
            compose(Some("{analogy} - {definition_simplified}"), "D", "A"),
            "A - D"
        );
    }

    #[test]
    fn every_occurrence_is_replaced() {
        assert_eq!(
            compose(Some("{analogy}/{analogy}/{definition_simplified}"), "D", "A"),
            "A/A/D"
        );
    }

    #[test]
    fn analogy_token_inside_definition_is_substituted() {
        assert_eq!(
            compose(None, "water {analogy}", "rain"),
            "water rain. rain"
        );
    }

    #[test]
    fn definition_token_inside_analogy_is_left_alone() {
        assert_eq!(
            compose(None, "D", "see {definition_simplified}"),
            "D. see {definition_simplified}"
        );
    }

    #[test]
    fn template_without_placeholders_is_returned_verbatim() {
        assert_eq!(compose(Some("Namaste"), "D", "A"), "Namaste");
    }
}
