//! Generation handlers.
//!
//! Each workflow reads documents, calls one external collaborator per
//! step, and persists what comes back. Steps run sequentially and the first
//! failure ends the workflow; work already persisted stays in place.

mod answer_question;
mod compile_notes;
mod convert_pdf;
mod generate_audio;
mod generate_flashcards;
mod generate_image_text;
mod generate_quiz;

pub use answer_question::{AnswerQuestionCommand, AnswerQuestionHandler};
pub use compile_notes::{CompileNotesCommand, CompileNotesHandler};
pub use convert_pdf::{ConvertPdfCommand, ConvertPdfHandler};
pub use generate_audio::{
    GenerateAllAudioCommand, GenerateAllAudioHandler, GenerateAudioCommand, GenerateAudioHandler,
};
pub use generate_flashcards::{GenerateFlashcardsCommand, GenerateFlashcardsHandler};
pub use generate_image_text::{
    GenerateAllImageTextCommand, GenerateAllImageTextHandler, GenerateImageTextCommand,
    GenerateImageTextHandler,
};
pub use generate_quiz::{GenerateQuizCommand, GenerateQuizHandler};

/// Tunables shared by the generation workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Pages per batch quiz request.
    pub quiz_chunk_size: usize,
    /// Questions requested per batch quiz chunk.
    pub quiz_questions_per_chunk: usize,
    /// Questions requested for a single page.
    pub quiz_questions_per_image: usize,
    /// Pages per batch flashcard request.
    pub flashcard_chunk_size: usize,
    /// Preceding pages included as narration context.
    pub context_window: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            quiz_chunk_size: 5,
            quiz_questions_per_chunk: 10,
            quiz_questions_per_image: 3,
            flashcard_chunk_size: 10,
            context_window: 2,
        }
    }
}

/// Which pages a quiz or flashcard generation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationScope {
    /// Every page of the slide, in chunks.
    Deck,
    /// One page, avoiding items it already has.
    Page(crate::domain::foundation::SlideImageId),
}
