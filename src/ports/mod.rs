//! Ports - Interfaces for external collaborators.
//!
//! Ports define the contracts the application layer depends on.
//! Adapters provide the concrete implementations.
//!
//! ## Persistence
//!
//! - `SpaceRepository`, `SlideRepository`, `SlideImageRepository`
//! - `UserRepository`, `AccessCodeRepository`
//! - `QuizQuestionRepository`, `FlashcardRepository`
//!
//! ## External services
//!
//! - `AIProvider` - chat and vision completions
//! - `SpeechSynthesizer` - text-to-speech
//! - `ObjectStorage` - blob upload/delete with public URLs
//! - `PdfRasterizer` - page rendering
//! - `FileDownloader` - remote file fetch

mod access_code_repository;
mod ai_provider;
mod file_downloader;
mod flashcard_repository;
mod object_storage;
mod pdf_rasterizer;
mod quiz_question_repository;
mod slide_image_repository;
mod slide_repository;
mod space_repository;
mod speech_synthesizer;
mod user_repository;

pub use access_code_repository::AccessCodeRepository;
pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ContentPart, FinishReason,
    ImageDetail, Message, MessageRole, ProviderInfo, ResponseFormat, TokenUsage,
};
pub use file_downloader::{DownloadError, FileDownloader};
pub use flashcard_repository::FlashcardRepository;
pub use object_storage::{s3_key_from_url, ObjectStorage, StorageError};
pub use pdf_rasterizer::{PageImage, PdfRasterizer, RasterizeError};
pub use quiz_question_repository::QuizQuestionRepository;
pub use slide_image_repository::SlideImageRepository;
pub use slide_repository::SlideRepository;
pub use space_repository::SpaceRepository;
pub use speech_synthesizer::{SpeechError, SpeechSynthesizer, SynthesizedAudio};
pub use user_repository::UserRepository;
