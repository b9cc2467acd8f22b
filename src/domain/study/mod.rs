//! Study module - generated quiz questions and flashcards.

mod flashcard;
mod quiz;

pub use flashcard::{Flashcard, GeneratedFlashcard};
pub use quiz::{GeneratedQuizQuestion, QuizQuestion};

use crate::domain::foundation::SlideId;

/// Distinct slide ids in first-seen order.
pub fn distinct_slide_ids(ids: impl IntoIterator<Item = SlideId>) -> Vec<SlideId> {
    let mut seen = Vec::new();
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_slide_ids_keeps_first_occurrence() {
        let a = SlideId::new();
        let b = SlideId::new();
        assert_eq!(distinct_slide_ids(vec![a, b, a, b, a]), vec![a, b]);
    }
}
