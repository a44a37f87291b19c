use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One step of a field location: an object key or an array index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for LocSegment {
    fn from(key: &str) -> Self {
        LocSegment::Key(key.to_string())
    }
}

impl From<usize> for LocSegment {
    fn from(index: usize) -> Self {
        LocSegment::Index(index)
    }
}

/// Category of a field-level violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Missing,
    StringType,
    IntType,
    ListType,
    ObjectType,
    LiteralError,
    JsonInvalid,
}

impl FieldErrorKind {
    pub fn default_message(&self) -> &'static str {
        match self {
            FieldErrorKind::Missing => "Field required",
            FieldErrorKind::StringType => "Input should be a valid string",
            FieldErrorKind::IntType => "Input should be a valid integer",
            FieldErrorKind::ListType => "Input should be a valid list",
            FieldErrorKind::ObjectType => "Input should be a valid object",
            FieldErrorKind::LiteralError => "Input should be 'term'",
            FieldErrorKind::JsonInvalid => "Body is not valid JSON",
        }
    }
}

/// A single field that violates the deck shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<LocSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(loc: Vec<LocSegment>, kind: FieldErrorKind) -> Self {
        Self {
            loc,
            msg: kind.default_message().to_string(),
            kind,
        }
    }

    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.msg = msg.into();
        self
    }

    /// Dotted path such as `concepts[0].term`
    pub fn path(&self) -> String {
        let mut out = String::new();
        for segment in &self.loc {
            match segment {
                LocSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                LocSegment::Index(i) => out.push_str(&format!("[{}]", i)),
            }
        }
        out
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.loc.is_empty() {
            write!(f, "{}", self.msg)
        } else {
            write!(f, "{}: {}", self.path(), self.msg)
        }
    }
}

/// Payload rejected by the deck validator; carries every violation found
#[derive(Debug, Clone, Error)]
#[error("{} validation error(s) for Deck: {}", .errors.len(), summarize(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::new(vec![
            FieldError::new(Vec::new(), FieldErrorKind::JsonInvalid).with_message(message)
        ])
    }

    pub fn fields(&self) -> impl Iterator<Item = String> + '_ {
        self.errors.iter().map(FieldError::path)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
