pub mod deck;
pub mod library;
