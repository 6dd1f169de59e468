//! Request routing.
//!
//! Maps each path to a catalog operation and wraps the result in the JSON
//! envelope clients expect. Routing is pure: no I/O happens here, so the
//! whole API can be exercised without a socket.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use sikho_core::leveling::DEFAULT_XP_GAIN;
use sikho_core::{Catalog, Xp};

use crate::config::ServerConfig;
use crate::http::{Request, Response};

/// Body of `POST /gain_xp`. Any JSON number is accepted for either field.
#[derive(Debug, Deserialize)]
struct GainXpBody {
    #[serde(default)]
    current_xp: Xp,
    #[serde(default = "default_add")]
    add: Xp,
}

fn default_add() -> Xp {
    DEFAULT_XP_GAIN
}

/// Dispatches requests against a shared, read-only catalog.
#[derive(Debug, Clone)]
pub struct Router {
    catalog: Arc<Catalog>,
    default_persona: String,
    default_dialect: String,
}

impl Router {
    pub fn new(catalog: Arc<Catalog>, config: &ServerConfig) -> Self {
        Self {
            catalog,
            default_persona: config.default_persona.clone(),
            default_dialect: config.default_dialect.clone(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Produce the response for one request.
    pub fn handle(&self, request: &Request) -> Response {
        if request.method == "OPTIONS" {
            return Response::no_content();
        }

        let segments: Vec<&str> = request.segments.iter().map(String::as_str).collect();

        match (request.method.as_str(), segments.as_slice()) {
            ("GET", []) => Response::json(
                200,
                &json!({"status": "running", "message": "Backend OK"}),
            ),
            ("GET", ["definition_list"]) => Response::json(
                200,
                &json!({"status": "ok", "data": self.catalog.definitions()}),
            ),
            ("GET", ["analogy_list"]) => Response::json(
                200,
                &json!({"status": "ok", "data": self.catalog.analogies()}),
            ),
            ("GET", ["dialect_templates"]) => Response::json(200, self.catalog.dialects()),
            ("GET", ["gamify"]) => Response::json(200, self.catalog.gamification()),
            ("GET", ["definition", concept_id]) if !concept_id.is_empty() => {
                self.definition(concept_id)
            }
            ("GET", ["analogy", concept_id]) if !concept_id.is_empty() => {
                self.analogy(concept_id, request)
            }
            ("GET", ["explain", concept_id]) if !concept_id.is_empty() => {
                self.explain(concept_id, request)
            }
            ("POST", ["gain_xp"]) => self.gain_xp(&request.body),
            (_, path) if is_known_path(path) => Response::error(405, "Method not allowed"),
            _ => Response::error(404, "Not found"),
        }
    }

    fn definition(&self, concept_id: &str) -> Response {
        match self.catalog.find_definition(concept_id) {
            Some(def) => Response::json(200, &json!({"status": "ok", "data": def})),
            None => Response::error(404, "Concept not found"),
        }
    }

    fn analogy(&self, concept_id: &str, request: &Request) -> Response {
        let persona = request
            .query_param("persona")
            .unwrap_or(self.default_persona.as_str());

        match self.catalog.find_analogy(concept_id, persona) {
            Some(analogy) => Response::json(200, &json!({"status": "ok", "analogy": analogy})),
            None => Response::error(404, "Analogy not found"),
        }
    }

    fn explain(&self, concept_id: &str, request: &Request) -> Response {
        let persona = request
            .query_param("persona")
            .unwrap_or(self.default_persona.as_str());
        let dialect = request
            .query_param("dialect")
            .unwrap_or(self.default_dialect.as_str());

        match self.catalog.explain(concept_id, persona, dialect) {
            Some(explanation) => Response::json(
                200,
                &json!({
                    "status": "ok",
                    "definition": explanation.definition,
                    "analogy": explanation.analogy,
                    "dialect_output": explanation.dialect_output,
                }),
            ),
            None => Response::error(404, "Concept not found"),
        }
    }

    fn gain_xp(&self, body: &[u8]) -> Response {
        let parsed = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .filter(serde_json::Value::is_object)
            .and_then(|value| serde_json::from_value::<GainXpBody>(value).ok());

        let Some(GainXpBody { current_xp, add }) = parsed else {
            return Response::error(400, "Invalid request body");
        };

        let gain = self.catalog.gain_xp(current_xp, add);
        Response::json(
            200,
            &json!({"status": "ok", "new_xp": gain.new_xp, "level": gain.level}),
        )
    }
}

fn is_known_path(path: &[&str]) -> bool {
    match path {
        [] | ["definition_list" | "analogy_list" | "dialect_templates" | "gamify" | "gain_xp"] => {
            true
        }
        ["definition" | "analogy" | "explain", concept_id] => !concept_id.is_empty(),
        _ => false,
    }
}
