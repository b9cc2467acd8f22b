//! Decoding of structured JSON payloads returned by the completion provider.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::study::{GeneratedFlashcard, GeneratedQuizQuestion};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("Generated payload is not valid JSON: {0}")]
    Malformed(String),
}

#[derive(Deserialize)]
struct QuizEnvelope {
    #[serde(default)]
    quiz_questions: Vec<GeneratedQuizQuestion>,
}

#[derive(Deserialize)]
struct FlashcardEnvelope {
    #[serde(default)]
    flashcards: Vec<GeneratedFlashcard>,
}

/// Decodes `{"quiz_questions": [...]}`.
pub fn decode_quiz_questions(content: &str) -> Result<Vec<GeneratedQuizQuestion>, PayloadError> {
    decode::<QuizEnvelope>(content).map(|e| e.quiz_questions)
}

/// Decodes `{"flashcards": [...]}`.
pub fn decode_flashcards(content: &str) -> Result<Vec<GeneratedFlashcard>, PayloadError> {
    decode::<FlashcardEnvelope>(content).map(|e| e.flashcards)
}

fn decode<T: DeserializeOwned>(content: &str) -> Result<T, PayloadError> {
    serde_json::from_str(strip_code_fence(content))
        .map_err(|e| PayloadError::Malformed(e.to_string()))
}

/// Removes a surrounding markdown code fence, with or without a language tag.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_quiz_envelope() {
        let content = r#"{"quiz_questions":[{"question":"Q1","answer_choices":["a","b","c","d"],"answer":"a","rationale":"r","slide_id":"slide_id_here"}]}"#;
        let questions = decode_quiz_questions(content).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].answer, "a");
        assert_eq!(questions[0].rationale, "r");
    }

    #[test]
    fn decodes_fenced_flashcards() {
        let content = "```json\n{\"flashcards\":[{\"question\":\"Q\",\"answer\":\"A\",\"rationale\":\"R\"}]}\n```";
        let cards = decode_flashcards(content).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "Q");
    }

    #[test]
    fn missing_field_yields_empty_list() {
        assert!(decode_flashcards(r#"{"cards":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let err = decode_quiz_questions("Sure! Here are your questions:").unwrap_err();
        assert!(matches!(err, PayloadError::Malformed(_)));
    }

    #[test]
    fn strip_code_fence_leaves_plain_json() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }
}
