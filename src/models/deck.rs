use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Schema version written when the caller does not supply one
pub const DEFAULT_DECK_VERSION: i64 = 1;

/// Discriminator for concept records. Only term/definition concepts exist today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConceptType {
    #[default]
    Term,
}

impl ConceptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConceptType::Term => "term",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "term" => Some(ConceptType::Term),
            _ => None,
        }
    }
}

/// Alternate phrasing of a concept (example, tip, misconception...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// A single learnable unit: a term and its definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermConcept {
    #[serde(default)]
    pub concept_type: ConceptType,
    pub term: String,
    pub definition: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub variations: Vec<Variation>,
}

/// Top-level persisted entity. Field order is the on-disk order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub concepts: Vec<TermConcept>,
    #[serde(default = "default_version")]
    pub version: i64,
}

/// Older deck files store `"variations": null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Variation>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Variation>>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_version() -> i64 {
    DEFAULT_DECK_VERSION
}

impl Deck {
    /// Build a deck with a freshly generated id and the default version
    pub fn new(title: impl Into<String>, concepts: Vec<TermConcept>) -> Self {
        Self {
            id: generate_deck_id(),
            title: title.into(),
            description: None,
            concepts,
            version: DEFAULT_DECK_VERSION,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl TermConcept {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            concept_type: ConceptType::Term,
            term: term.into(),
            definition: definition.into(),
            variations: Vec::new(),
        }
    }

    pub fn with_variation(mut self, kind: impl Into<String>, text: impl Into<String>) -> Self {
        self.variations.push(Variation {
            kind: kind.into(),
            text: text.into(),
        });
        self
    }
}

pub fn generate_deck_id() -> String {
    Uuid::new_v4().to_string()
}
