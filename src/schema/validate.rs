use serde_json::{Map, Value};

use super::error::{FieldError, FieldErrorKind, LocSegment, ValidationError};
use crate::models::{
    generate_deck_id, ConceptType, Deck, TermConcept, Variation, DEFAULT_DECK_VERSION,
};

/// Parse an untyped payload into a deck, collecting every field violation.
///
/// Defaults: `id` is generated when absent or null, `version` is 1 when absent,
/// `variations` is empty when absent or null, `conceptType` is `term` when absent.
/// Unknown keys are ignored.
pub fn parse_deck(payload: &Value) -> Result<Deck, ValidationError> {
    let mut validator = DeckValidator::default();
    let deck = validator.deck(payload);

    match deck {
        Some(deck) if validator.errors.is_empty() => Ok(deck),
        _ if validator.errors.is_empty() => Err(ValidationError::new(vec![FieldError::new(
            Vec::new(),
            FieldErrorKind::ObjectType,
        )])),
        _ => Err(ValidationError::new(validator.errors)),
    }
}

/// Parse raw request bytes, mapping JSON syntax errors to a validation error
pub fn parse_deck_bytes(body: &[u8]) -> Result<Deck, ValidationError> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| ValidationError::invalid_json(format!("Body is not valid JSON: {}", e)))?;
    parse_deck(&payload)
}

#[derive(Default)]
struct DeckValidator {
    errors: Vec<FieldError>,
}

fn at(loc: &[LocSegment], segment: impl Into<LocSegment>) -> Vec<LocSegment> {
    let mut out = loc.to_vec();
    out.push(segment.into());
    out
}

impl DeckValidator {
    fn fail(&mut self, loc: Vec<LocSegment>, kind: FieldErrorKind) {
        self.errors.push(FieldError::new(loc, kind));
    }

    fn deck(&mut self, payload: &Value) -> Option<Deck> {
        let obj = self.object(payload, Vec::new())?;

        let id = self.optional_string(obj, &[], "id");
        let title = self.required_string(obj, &[], "title");
        let description = self.optional_string(obj, &[], "description");
        let concepts = self.concepts(obj);
        let version = self.integer_or(obj, &[], "version", DEFAULT_DECK_VERSION);

        Some(Deck {
            id: id?.unwrap_or_else(generate_deck_id),
            title: title?,
            description: description?,
            concepts: concepts?,
            version: version?,
        })
    }

    fn concepts(&mut self, obj: &Map<String, Value>) -> Option<Vec<TermConcept>> {
        let loc = vec![LocSegment::from("concepts")];
        let items = match obj.get("concepts") {
            None => {
                self.fail(loc, FieldErrorKind::Missing);
                return None;
            }
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.fail(loc, FieldErrorKind::ListType);
                return None;
            }
        };

        // Visit every concept so all errors are reported, not just the first
        let parsed: Vec<Option<TermConcept>> = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.concept(item, at(&loc, i)))
            .collect();
        parsed.into_iter().collect()
    }

    fn concept(&mut self, value: &Value, loc: Vec<LocSegment>) -> Option<TermConcept> {
        let obj = self.object(value, loc.clone())?;

        let concept_type = match obj.get("conceptType") {
            None => Some(ConceptType::Term),
            Some(Value::String(s)) => match ConceptType::parse(s) {
                Some(kind) => Some(kind),
                None => {
                    self.fail(at(&loc, "conceptType"), FieldErrorKind::LiteralError);
                    None
                }
            },
            Some(_) => {
                self.fail(at(&loc, "conceptType"), FieldErrorKind::LiteralError);
                None
            }
        };
        let term = self.required_string(obj, &loc, "term");
        let definition = self.required_string(obj, &loc, "definition");
        let variations = self.variations(obj, &loc);

        Some(TermConcept {
            concept_type: concept_type?,
            term: term?,
            definition: definition?,
            variations: variations?,
        })
    }

    fn variations(&mut self, obj: &Map<String, Value>, loc: &[LocSegment]) -> Option<Vec<Variation>> {
        let loc = at(loc, "variations");
        let items = match obj.get("variations") {
            None | Some(Value::Null) => return Some(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.fail(loc, FieldErrorKind::ListType);
                return None;
            }
        };

        let parsed: Vec<Option<Variation>> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let item_loc = at(&loc, i);
                let obj = self.object(item, item_loc.clone())?;
                let kind = self.required_string(obj, &item_loc, "type");
                let text = self.required_string(obj, &item_loc, "text");
                Some(Variation {
                    kind: kind?,
                    text: text?,
                })
            })
            .collect();
        parsed.into_iter().collect()
    }

    fn object<'a>(&mut self, value: &'a Value, loc: Vec<LocSegment>) -> Option<&'a Map<String, Value>> {
        match value {
            Value::Object(obj) => Some(obj),
            _ => {
                self.fail(loc, FieldErrorKind::ObjectType);
                None
            }
        }
    }

    fn required_string(&mut self, obj: &Map<String, Value>, loc: &[LocSegment], key: &str) -> Option<String> {
        match obj.get(key) {
            None => {
                self.fail(at(loc, key), FieldErrorKind::Missing);
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.fail(at(loc, key), FieldErrorKind::StringType);
                None
            }
        }
    }

    /// `Some(None)` when absent or null, `None` when present with the wrong type
    fn optional_string(
        &mut self,
        obj: &Map<String, Value>,
        loc: &[LocSegment],
        key: &str,
    ) -> Option<Option<String>> {
        match obj.get(key) {
            None | Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(_) => {
                self.fail(at(loc, key), FieldErrorKind::StringType);
                None
            }
        }
    }

    fn integer_or(&mut self, obj: &Map<String, Value>, loc: &[LocSegment], key: &str, default: i64) -> Option<i64> {
        match obj.get(key) {
            None => Some(default),
            Some(value) => match value.as_i64() {
                Some(n) => Some(n),
                None => {
                    self.fail(at(loc, key), FieldErrorKind::IntType);
                    None
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(err: &ValidationError) -> Vec<String> {
        err.fields().collect()
    }

    #[test]
    fn minimal_payload_gets_defaults() {
        let deck = parse_deck(&json!({
            "title": "Spanish Basics",
            "concepts": [{"term": "hola", "definition": "hello"}]
        }))
        .unwrap();

        assert_eq!(deck.title, "Spanish Basics");
        assert_eq!(deck.description, None);
        assert_eq!(deck.version, 1);
        assert_eq!(deck.concepts.len(), 1);
        assert_eq!(deck.concepts[0].concept_type, ConceptType::Term);
        assert!(deck.concepts[0].variations.is_empty());
        assert!(uuid::Uuid::parse_str(&deck.id).is_ok());
    }

    #[test]
    fn caller_supplied_fields_are_kept() {
        let deck = parse_deck(&json!({
            "id": "my-own-id",
            "title": "Biology",
            "description": "Cells",
            "version": 3,
            "concepts": [{
                "conceptType": "term",
                "term": "mitochondria",
                "definition": "powerhouse of the cell",
                "variations": [
                    {"type": "fun-fact", "text": "has its own DNA"},
                    {"type": "tip", "text": "think battery"}
                ]
            }]
        }))
        .unwrap();

        assert_eq!(deck.id, "my-own-id");
        assert_eq!(deck.description.as_deref(), Some("Cells"));
        assert_eq!(deck.version, 3);
        let kinds: Vec<&str> = deck.concepts[0].variations.iter().map(|v| v.kind.as_str()).collect();
        assert_eq!(kinds, vec!["fun-fact", "tip"]);
    }

    #[test]
    fn null_description_id_and_variations_are_accepted() {
        let deck = parse_deck(&json!({
            "id": null,
            "title": "T",
            "description": null,
            "concepts": [{"term": "a", "definition": "b", "variations": null}]
        }))
        .unwrap();

        assert!(!deck.id.is_empty());
        assert_eq!(deck.description, None);
        assert!(deck.concepts[0].variations.is_empty());
    }

    #[test]
    fn empty_concepts_are_allowed() {
        let deck = parse_deck(&json!({"title": "Empty", "concepts": []})).unwrap();
        assert!(deck.concepts.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let deck = parse_deck(&json!({
            "title": "Extra",
            "concepts": [],
            "author": "someone"
        }))
        .unwrap();
        let value = serde_json::to_value(&deck).unwrap();
        assert!(value.get("author").is_none());
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let err = parse_deck(&json!({"description": "no title"})).unwrap_err();
        assert_eq!(paths(&err), vec!["title", "concepts"]);
        assert!(err.errors.iter().all(|e| e.kind == FieldErrorKind::Missing));
    }

    #[test]
    fn nested_errors_carry_their_location() {
        let err = parse_deck(&json!({
            "title": "Nested",
            "concepts": [
                {"term": "ok", "definition": "fine"},
                {"definition": "no term"},
                {"term": "x", "definition": 5, "variations": [{"type": "tip"}]},
                "not an object"
            ]
        }))
        .unwrap_err();

        assert_eq!(
            paths(&err),
            vec![
                "concepts[1].term",
                "concepts[2].definition",
                "concepts[2].variations[0].text",
                "concepts[3]",
            ]
        );
        assert_eq!(err.errors[1].kind, FieldErrorKind::StringType);
        assert_eq!(err.errors[3].kind, FieldErrorKind::ObjectType);
    }

    #[test]
    fn unknown_concept_type_is_rejected() {
        let err = parse_deck(&json!({
            "title": "Seq",
            "concepts": [{"conceptType": "sequence", "term": "a", "definition": "b"}]
        }))
        .unwrap_err();

        assert_eq!(paths(&err), vec!["concepts[0].conceptType"]);
        assert_eq!(err.errors[0].kind, FieldErrorKind::LiteralError);
    }

    #[test]
    fn wrong_primitive_types_are_rejected() {
        let err = parse_deck(&json!({
            "id": 7,
            "title": ["list"],
            "description": false,
            "concepts": {},
            "version": "one"
        }))
        .unwrap_err();

        assert_eq!(paths(&err), vec!["id", "title", "description", "concepts", "version"]);
    }

    #[test]
    fn non_integer_version_is_rejected() {
        let err = parse_deck(&json!({"title": "V", "concepts": [], "version": 1.5})).unwrap_err();
        assert_eq!(err.errors[0].kind, FieldErrorKind::IntType);
    }

    #[test]
    fn top_level_must_be_an_object() {
        let err = parse_deck(&json!(["title"])).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert!(err.errors[0].loc.is_empty());
        assert_eq!(err.errors[0].kind, FieldErrorKind::ObjectType);
    }

    #[test]
    fn invalid_json_bytes() {
        let err = parse_deck_bytes(b"{\"title\": ").unwrap_err();
        assert_eq!(err.errors[0].kind, FieldErrorKind::JsonInvalid);
    }
}
