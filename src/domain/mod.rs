//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `catalog` - Spaces, slide decks and page images
//! - `account` - Users, credits and access codes
//! - `study` - Generated quiz questions and flashcards
//! - `generation` - Prompt, context and payload helpers for generation workflows

pub mod account;
pub mod catalog;
pub mod foundation;
pub mod generation;
pub mod study;
