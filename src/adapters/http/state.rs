//! Shared application state for the HTTP layer.
//!
//! Holds every port behind an `Arc<dyn _>` and builds a fresh application
//! handler per request.

use std::sync::Arc;

use crate::adapters::memory::{
    InMemoryAccessCodeRepository, InMemoryFlashcardRepository, InMemoryQuizQuestionRepository,
    InMemorySlideImageRepository, InMemorySlideRepository, InMemorySpaceRepository,
    InMemoryUserRepository,
};
use crate::application::handlers::{
    AccessCodeHandler, AnswerQuestionHandler, CompileNotesHandler, ConvertPdfHandler,
    CreditsHandler, DeleteSlideHandler, FlashcardHandler, GenerateAllAudioHandler,
    GenerateAllImageTextHandler, GenerateAudioHandler, GenerateFlashcardsHandler,
    GenerateImageTextHandler, GenerateQuizHandler, GenerationSettings, QuizQuestionHandler,
    SlideHandler, SpaceHandler, UserHandler, VerifyAccessCodeHandler,
};
use crate::ports::{
    AIProvider, AccessCodeRepository, FileDownloader, FlashcardRepository, ObjectStorage,
    PdfRasterizer, QuizQuestionRepository, SlideImageRepository, SlideRepository,
    SpaceRepository, SpeechSynthesizer, UserRepository,
};

/// One repository per collection.
#[derive(Clone)]
pub struct Repositories {
    pub spaces: Arc<dyn SpaceRepository>,
    pub slides: Arc<dyn SlideRepository>,
    pub images: Arc<dyn SlideImageRepository>,
    pub users: Arc<dyn UserRepository>,
    pub access_codes: Arc<dyn AccessCodeRepository>,
    pub quiz_questions: Arc<dyn QuizQuestionRepository>,
    pub flashcards: Arc<dyn FlashcardRepository>,
}

impl Repositories {
    /// Process-local repositories with no persistence.
    pub fn in_memory() -> Self {
        Self {
            spaces: Arc::new(InMemorySpaceRepository::new()),
            slides: Arc::new(InMemorySlideRepository::new()),
            images: Arc::new(InMemorySlideImageRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            access_codes: Arc::new(InMemoryAccessCodeRepository::new()),
            quiz_questions: Arc::new(InMemoryQuizQuestionRepository::new()),
            flashcards: Arc::new(InMemoryFlashcardRepository::new()),
        }
    }
}

/// External services the generation workflows call.
#[derive(Clone)]
pub struct Services {
    pub ai: Arc<dyn AIProvider>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub storage: Arc<dyn ObjectStorage>,
    pub rasterizer: Arc<dyn PdfRasterizer>,
    pub downloader: Arc<dyn FileDownloader>,
}

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct AppState {
    pub repositories: Repositories,
    pub services: Services,
    pub settings: GenerationSettings,
}

impl AppState {
    pub fn new(repositories: Repositories, services: Services, settings: GenerationSettings) -> Self {
        Self {
            repositories,
            services,
            settings,
        }
    }

    // ─── Catalog ──────────────────────────────────────────────────────

    pub fn space_handler(&self) -> SpaceHandler {
        SpaceHandler::new(
            self.repositories.spaces.clone(),
            self.repositories.slides.clone(),
        )
    }

    pub fn slide_handler(&self) -> SlideHandler {
        SlideHandler::new(
            self.repositories.slides.clone(),
            self.repositories.images.clone(),
            self.services.storage.clone(),
        )
    }

    pub fn delete_slide_handler(&self) -> DeleteSlideHandler {
        DeleteSlideHandler::new(
            self.repositories.slides.clone(),
            self.repositories.images.clone(),
            self.services.storage.clone(),
        )
    }

    // ─── Account ──────────────────────────────────────────────────────

    pub fn user_handler(&self) -> UserHandler {
        UserHandler::new(
            self.repositories.users.clone(),
            self.repositories.spaces.clone(),
        )
    }

    pub fn credits_handler(&self) -> CreditsHandler {
        CreditsHandler::new(self.repositories.users.clone())
    }

    pub fn access_code_handler(&self) -> AccessCodeHandler {
        AccessCodeHandler::new(self.repositories.access_codes.clone())
    }

    pub fn verify_access_code_handler(&self) -> VerifyAccessCodeHandler {
        VerifyAccessCodeHandler::new(
            self.repositories.access_codes.clone(),
            self.repositories.users.clone(),
        )
    }

    // ─── Generation ───────────────────────────────────────────────────

    pub fn convert_pdf_handler(&self) -> ConvertPdfHandler {
        ConvertPdfHandler::new(
            self.repositories.slides.clone(),
            self.repositories.images.clone(),
            self.services.storage.clone(),
            self.services.downloader.clone(),
            self.services.rasterizer.clone(),
        )
    }

    pub fn generate_image_text_handler(&self) -> GenerateImageTextHandler {
        GenerateImageTextHandler::new(
            self.repositories.images.clone(),
            self.services.ai.clone(),
            self.settings.context_window,
        )
    }

    pub fn generate_all_image_text_handler(&self) -> GenerateAllImageTextHandler {
        GenerateAllImageTextHandler::new(
            self.repositories.images.clone(),
            self.services.ai.clone(),
            self.settings.context_window,
        )
    }

    pub fn compile_notes_handler(&self) -> CompileNotesHandler {
        CompileNotesHandler::new(
            self.repositories.slides.clone(),
            self.repositories.images.clone(),
        )
    }

    pub fn generate_audio_handler(&self) -> GenerateAudioHandler {
        GenerateAudioHandler::new(
            self.repositories.images.clone(),
            self.services.speech.clone(),
            self.services.storage.clone(),
        )
    }

    pub fn generate_all_audio_handler(&self) -> GenerateAllAudioHandler {
        GenerateAllAudioHandler::new(
            self.repositories.images.clone(),
            self.services.speech.clone(),
            self.services.storage.clone(),
        )
    }

    pub fn generate_quiz_handler(&self) -> GenerateQuizHandler {
        GenerateQuizHandler::new(
            self.repositories.images.clone(),
            self.repositories.quiz_questions.clone(),
            self.services.ai.clone(),
            self.settings,
        )
    }

    pub fn generate_flashcards_handler(&self) -> GenerateFlashcardsHandler {
        GenerateFlashcardsHandler::new(
            self.repositories.images.clone(),
            self.repositories.flashcards.clone(),
            self.services.ai.clone(),
            self.settings,
        )
    }

    pub fn answer_question_handler(&self) -> AnswerQuestionHandler {
        AnswerQuestionHandler::new(self.services.ai.clone())
    }

    // ─── Study ────────────────────────────────────────────────────────

    pub fn quiz_question_handler(&self) -> QuizQuestionHandler {
        QuizQuestionHandler::new(
            self.repositories.quiz_questions.clone(),
            self.repositories.slides.clone(),
        )
    }

    pub fn flashcard_handler(&self) -> FlashcardHandler {
        FlashcardHandler::new(
            self.repositories.flashcards.clone(),
            self.repositories.slides.clone(),
        )
    }
}
