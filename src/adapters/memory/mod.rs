//! In-memory repository implementations.
//!
//! Thread-safe via internal `Mutex`. Used by tests and for running the
//! service without a database. Data does not survive restarts.

mod account;
mod catalog;
mod study;

pub use account::{InMemoryAccessCodeRepository, InMemoryUserRepository};
pub use catalog::{InMemorySlideImageRepository, InMemorySlideRepository, InMemorySpaceRepository};
pub use study::{InMemoryFlashcardRepository, InMemoryQuizQuestionRepository};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks a store, recovering the data if a previous holder panicked.
fn lock<T>(store: &Mutex<T>) -> MutexGuard<'_, T> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}
