use serde::{Deserialize, Serialize};

use super::deck::{ConceptType, Deck};

/// Card type discriminator; only plain flashcards are generated today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Flashcard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardData {
    pub front: String,
    pub back: String,
}

/// A playable card generated from a concept. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub card_type: CardType,
    pub data: FlashcardData,
}

impl Flashcard {
    fn new(front: &str, back: &str) -> Self {
        Self {
            card_type: CardType::Flashcard,
            data: FlashcardData {
                front: front.to_string(),
                back: back.to_string(),
            },
        }
    }
}

/// Generate flashcards for every term concept in deck order.
/// Each concept yields a forward card (term -> definition) then a reverse card.
pub fn generate_flashcards(deck: &Deck) -> Vec<Flashcard> {
    let mut cards = Vec::with_capacity(deck.concepts.len() * 2);

    for concept in &deck.concepts {
        match concept.concept_type {
            ConceptType::Term => {
                cards.push(Flashcard::new(&concept.term, &concept.definition));
                cards.push(Flashcard::new(&concept.definition, &concept.term));
            }
        }
    }

    cards
}
