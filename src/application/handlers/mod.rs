//! Application handlers.
//!
//! CRUD handlers group the operations of one entity; workflow handlers take a
//! command and run it to completion.
//!
//! - `catalog` - spaces, slides, page images and the slide delete cascade
//! - `account` - users, credits and access codes
//! - `study` - stored quiz questions and flashcards
//! - `generation` - PDF conversion, narration, audio, quiz, flashcards, search

pub mod account;
pub mod catalog;
pub mod generation;
pub mod study;

pub use account::{
    AccessCodeHandler, AddSpaceOutcome, CreateUserCommand, CreditChange, CreditsHandler,
    UserHandler, VerifyAccessCodeCommand, VerifyAccessCodeHandler,
};
pub use catalog::{
    CreateSlideCommand, DeleteSlideCommand, DeleteSlideHandler, DeleteSlideResult, SlideHandler,
    SpaceHandler, UploadSlideCommand,
};
pub use generation::{
    AnswerQuestionCommand, AnswerQuestionHandler, CompileNotesCommand, CompileNotesHandler,
    ConvertPdfCommand, ConvertPdfHandler, GenerateAllAudioCommand, GenerateAllAudioHandler,
    GenerateAllImageTextCommand, GenerateAllImageTextHandler, GenerateAudioCommand,
    GenerateAudioHandler, GenerateFlashcardsCommand, GenerateFlashcardsHandler,
    GenerateImageTextCommand, GenerateImageTextHandler, GenerateQuizCommand, GenerateQuizHandler,
    GenerationScope, GenerationSettings,
};
pub use study::{FlashcardHandler, QuizQuestionHandler};
