//! PostgreSQL implementation of FlashcardRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::column;
use crate::domain::foundation::{DomainError, ErrorCode, FlashcardId, SlideId, SlideImageId};
use crate::domain::study::Flashcard;
use crate::ports::FlashcardRepository;

#[derive(Clone)]
pub struct PostgresFlashcardRepository {
    pool: PgPool,
}

impl PostgresFlashcardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_CARD: &str =
    "SELECT id, question, answer, slide_id, slide_image_id FROM flashcards";

#[async_trait]
impl FlashcardRepository for PostgresFlashcardRepository {
    async fn save_all(&self, cards: &[Flashcard]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("begin transaction", e))?;

        for card in cards {
            sqlx::query(
                r#"
                INSERT INTO flashcards (id, question, answer, slide_id, slide_image_id)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(card.id.as_uuid())
            .bind(&card.question)
            .bind(&card.answer)
            .bind(card.slide_id.as_uuid())
            .bind(card.slide_image_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("insert flashcard", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("commit flashcards", e))
    }

    async fn find_by_slide(&self, slide_id: &SlideId) -> Result<Vec<Flashcard>, DomainError> {
        let rows = sqlx::query(&format!("{} WHERE slide_id = $1 ORDER BY seq", SELECT_CARD))
            .bind(slide_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("list flashcards", e))?;

        rows.iter().map(row_to_card).collect()
    }

    async fn find_by_slide_image(
        &self,
        slide_id: &SlideId,
        slide_image_id: &SlideImageId,
    ) -> Result<Vec<Flashcard>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE slide_id = $1 AND slide_image_id = $2 ORDER BY seq",
            SELECT_CARD
        ))
        .bind(slide_id.as_uuid())
        .bind(slide_image_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list flashcards by image", e))?;

        rows.iter().map(row_to_card).collect()
    }

    async fn distinct_slide_ids(&self) -> Result<Vec<SlideId>, DomainError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT slide_id FROM flashcards GROUP BY slide_id ORDER BY MIN(seq)",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list flashcard slide ids", e))?;

        Ok(ids.into_iter().map(SlideId::from_uuid).collect())
    }

    async fn delete(&self, id: &FlashcardId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM flashcards WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("delete flashcard", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::FlashcardNotFound,
                format!("Flashcard not found: {}", id),
            ));
        }
        Ok(())
    }
}

fn row_to_card(row: &PgRow) -> Result<Flashcard, DomainError> {
    Ok(Flashcard {
        id: FlashcardId::from_uuid(column(row, "id")?),
        question: column(row, "question")?,
        answer: column(row, "answer")?,
        slide_id: SlideId::from_uuid(column(row, "slide_id")?),
        slide_image_id: SlideImageId::from_uuid(column(row, "slide_image_id")?),
    })
}
