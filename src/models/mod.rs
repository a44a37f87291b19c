pub mod deck;
pub mod flashcard;

pub use deck::{generate_deck_id, ConceptType, Deck, TermConcept, Variation, DEFAULT_DECK_VERSION};
pub use flashcard::{generate_flashcards, CardType, Flashcard, FlashcardData};
