//! Prompt context assembly for narration, quiz and flashcard generation.

use thiserror::Error;

use crate::domain::catalog::SlideImage;
use crate::domain::foundation::SlideImageId;
use crate::domain::study::{Flashcard, QuizQuestion};

/// An image in a chunk has no narration to draw from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Generated text not found for slide image {image_id} (order {order})")]
pub struct MissingText {
    pub image_id: SlideImageId,
    pub order: i32,
}

/// Builds the narration prefix for `target`.
///
/// Takes the last `window` images of the same deck that precede `target` by
/// order and emits each as `SLIDE {n}: \n{text}\n\n`, then opens the
/// target's own section with `SLIDE {n}: \n`. Numbers are one-based.
pub fn narration_context(deck: &[SlideImage], target: &SlideImage, window: usize) -> String {
    let mut preceding: Vec<&SlideImage> = deck
        .iter()
        .filter(|image| image.slide_id == target.slide_id && image.order < target.order)
        .collect();
    preceding.sort_by_key(|image| image.order);

    let skip = preceding.len().saturating_sub(window);
    let mut context = String::new();
    for image in preceding.into_iter().skip(skip) {
        context.push_str(&format!(
            "SLIDE {}: \n{}\n\n",
            image.display_number(),
            image.generated_text
        ));
    }
    context.push_str(&format!("SLIDE {}: \n", target.display_number()));
    context
}

/// Concatenates the narration of a chunk of images, tagging each with its
/// origin. Fails on the first image without text.
pub fn chunk_context(chunk: &[SlideImage]) -> Result<String, MissingText> {
    let mut context = String::new();
    for image in chunk {
        if !image.has_text() {
            return Err(MissingText {
                image_id: image.id,
                order: image.order,
            });
        }
        context.push_str(&format!(
            "Slide ID: {}, Slide Image ID: {}\n{}\n\n",
            image.slide_id, image.id, image.generated_text
        ));
    }
    Ok(context)
}

/// Single-image quiz context: the narration followed by the questions that
/// already exist for the image, if any.
pub fn quiz_image_context(image: &SlideImage, existing: &[QuizQuestion]) -> Result<String, MissingText> {
    let mut context = image_text(image)?;
    if !existing.is_empty() {
        context.push_str("\n\nExisting Questions:\n");
    }
    for question in existing {
        context.push_str(&format!("Q: {}\nA: {}\n", question.question, question.answer));
    }
    Ok(context)
}

/// Single-image flashcard context: the narration followed by the cards that
/// already exist for the image, if any.
pub fn flashcard_image_context(image: &SlideImage, existing: &[Flashcard]) -> Result<String, MissingText> {
    let mut context = image_text(image)?;
    if !existing.is_empty() {
        context.push_str("\n\nExisting Flashcards:\n");
    }
    for card in existing {
        context.push_str(&format!("Q: {}\nA: {}\n", card.question, card.answer));
    }
    Ok(context)
}

fn image_text(image: &SlideImage) -> Result<String, MissingText> {
    if !image.has_text() {
        return Err(MissingText {
            image_id: image.id,
            order: image.order,
        });
    }
    Ok(image.generated_text.clone())
}
