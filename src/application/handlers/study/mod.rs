//! Study handlers - reading and pruning generated quiz questions and
//! flashcards.

mod flashcards;
mod quiz_questions;

pub use flashcards::FlashcardHandler;
pub use quiz_questions::QuizQuestionHandler;
