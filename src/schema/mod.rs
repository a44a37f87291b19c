pub mod error;
pub mod validate;

pub use error::{FieldError, FieldErrorKind, LocSegment, ValidationError};
pub use validate::{parse_deck, parse_deck_bytes};
