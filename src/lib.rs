//! Slide Study - lecture decks turned into study material
//!
//! Uploaded PDF decks are rasterized into page images, narrated by a vision
//! model, voiced with text-to-speech, and mined for quiz questions and
//! flashcards. Everything is served over a REST API with server-sent event
//! progress for the long-running workflows.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
