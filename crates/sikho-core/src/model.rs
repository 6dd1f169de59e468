//! Core data model types for sikho.
//!
//! These mirror the four JSON dataset files. Fields the server does not
//! interpret (topic, subject, badges and so on) are kept in an `extra` map so
//! the list endpoints hand them back to clients unchanged.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field-name prefix marking a persona variant in an analogy record.
pub const ANALOGY_PREFIX: &str = "analogy_";

/// A concept with its canonical definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptDefinition {
    /// Unique concept identifier.
    pub id: String,
    /// Canonical definition text.
    pub definition: String,
    /// Shorter wording of the definition, if the dataset provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_simplified: Option<String>,
    /// Any other fields present in the file.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Persona-specific analogies for one concept.
///
/// On disk each persona is a field named `analogy_<persona>`; in memory the
/// prefix is stripped and the variants live in `personas`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalogyRecord {
    /// The concept this record explains. Not checked against the definitions.
    pub concept_id: String,
    /// Persona name (e.g. "farmer") to analogy text.
    pub personas: BTreeMap<String, String>,
    /// Any other fields present in the file.
    pub extra: Map<String, Value>,
}

impl AnalogyRecord {
    /// Analogy text for a persona, if this record has one.
    pub fn analogy(&self, persona: &str) -> Option<&str> {
        self.personas.get(persona).map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for AnalogyRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        let concept_id = match fields.remove("concept_id") {
            Some(Value::String(id)) => id,
            Some(_) => return Err(de::Error::custom("concept_id must be a string")),
            None => return Err(de::Error::missing_field("concept_id")),
        };

        let mut personas = BTreeMap::new();
        let mut extra = Map::new();
        for (key, value) in fields {
            if let (Some(persona), Value::String(text)) = (key.strip_prefix(ANALOGY_PREFIX), &value)
            {
                if !persona.is_empty() {
                    personas.insert(persona.to_string(), text.clone());
                    continue;
                }
            }
            extra.insert(key, value);
        }

        Ok(AnalogyRecord {
            concept_id,
            personas,
            extra,
        })
    }
}

impl Serialize for AnalogyRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1 + self.personas.len() + self.extra.len()))?;
        map.serialize_entry("concept_id", &self.concept_id)?;
        for (persona, text) in &self.personas {
            map.serialize_entry(&format!("{ANALOGY_PREFIX}{persona}"), text)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Phrasing patterns keyed by dialect name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DialectTemplateSet {
    /// Dialect name (e.g. "bhojpuri") to its template.
    pub templates: BTreeMap<String, DialectTemplate>,
    /// Any other fields present in the file.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single dialect's phrasing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DialectTemplate {
    /// Pattern with `{definition_simplified}` and `{analogy}` placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_pattern: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The gamification dataset: level thresholds plus whatever else the file
/// carries (badges, titles).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GamificationTable {
    /// Thresholds in file order. Not required to be sorted.
    pub levels: Vec<LevelThreshold>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// XP needed to reach a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelThreshold {
    pub level: i64,
    pub xp_required: Xp,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LevelThreshold {
    pub fn new(level: i64, xp_required: i64) -> Self {
        Self {
            level,
            xp_required: Xp::Int(xp_required),
            extra: Map::new(),
        }
    }
}

/// An XP amount as it appears in JSON: an integer or a float.
///
/// Integers stay integers through arithmetic and serialization; once a float
/// is involved the result is a float. Comparison is numeric, so `Int(50)`
/// equals `Float(50.0)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Xp {
    Int(i64),
    Float(f64),
}

impl Xp {
    pub fn as_f64(self) -> f64 {
        match self {
            Xp::Int(n) => n as f64,
            Xp::Float(x) => x,
        }
    }
}

/// An integer sum that would overflow `i64` is carried as a float.
impl Add for Xp {
    type Output = Xp;

    fn add(self, other: Xp) -> Xp {
        match (self, other) {
            (Xp::Int(a), Xp::Int(b)) => match a.checked_add(b) {
                Some(sum) => Xp::Int(sum),
                None => Xp::Float(a as f64 + b as f64),
            },
            (a, b) => Xp::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl Default for Xp {
    fn default() -> Self {
        Xp::Int(0)
    }
}

impl From<i64> for Xp {
    fn from(n: i64) -> Self {
        Xp::Int(n)
    }
}

impl From<f64> for Xp {
    fn from(x: f64) -> Self {
        Xp::Float(x)
    }
}

impl PartialEq for Xp {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Xp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Xp::Int(a), Xp::Int(b)) => Some(a.cmp(b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl fmt::Display for Xp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Xp::Int(n) => write!(f, "{n}"),
            Xp::Float(x) => write!(f, "{x}"),
        }
    }
}

impl FromStr for Xp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Xp::Int(n));
        }
        match s.parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(Xp::Float(x)),
            _ => Err(format!("invalid XP amount: {s}")),
        }
    }
}
