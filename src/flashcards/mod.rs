//! Flashcards and review scheduling
//!
//! This module provides:
//! - Flashcard models and the three-bucket difficulty chain
//! - The review scheduler (difficulty walk + flat review intervals)
//! - Study sessions over a stack of cards
//! - Persistence of the card collection

pub mod models;
pub mod scheduler;
pub mod session;
pub mod storage;

pub use models::*;
pub use scheduler::{due_cards, is_due, review_card};
pub use session::ReviewSession;
pub use storage::FlashcardStorage;
