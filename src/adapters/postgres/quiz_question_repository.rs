//! PostgreSQL implementation of QuizQuestionRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::column;
use crate::domain::foundation::{
    DomainError, ErrorCode, QuizQuestionId, SlideId, SlideImageId,
};
use crate::domain::study::QuizQuestion;
use crate::ports::QuizQuestionRepository;

#[derive(Clone)]
pub struct PostgresQuizQuestionRepository {
    pool: PgPool,
}

impl PostgresQuizQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_QUESTION: &str = r#"
    SELECT id, question, answer_choices, answer, rationale, slide_id, slide_image_id
    FROM quiz_questions
"#;

#[async_trait]
impl QuizQuestionRepository for PostgresQuizQuestionRepository {
    async fn save_all(&self, questions: &[QuizQuestion]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("begin transaction", e))?;

        for q in questions {
            sqlx::query(
                r#"
                INSERT INTO quiz_questions (
                    id, question, answer_choices, answer, rationale, slide_id, slide_image_id
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(q.id.as_uuid())
            .bind(&q.question)
            .bind(&q.answer_choices)
            .bind(&q.answer)
            .bind(&q.rationale)
            .bind(q.slide_id.as_uuid())
            .bind(q.slide_image_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("insert quiz question", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("commit quiz questions", e))
    }

    async fn find_by_slide(&self, slide_id: &SlideId) -> Result<Vec<QuizQuestion>, DomainError> {
        let rows = sqlx::query(&format!("{} WHERE slide_id = $1 ORDER BY seq", SELECT_QUESTION))
            .bind(slide_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("list quiz questions", e))?;

        rows.iter().map(row_to_question).collect()
    }

    async fn find_by_slide_image(
        &self,
        slide_id: &SlideId,
        slide_image_id: &SlideImageId,
    ) -> Result<Vec<QuizQuestion>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE slide_id = $1 AND slide_image_id = $2 ORDER BY seq",
            SELECT_QUESTION
        ))
        .bind(slide_id.as_uuid())
        .bind(slide_image_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list quiz questions by image", e))?;

        rows.iter().map(row_to_question).collect()
    }

    async fn distinct_slide_ids(&self) -> Result<Vec<SlideId>, DomainError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT slide_id FROM quiz_questions GROUP BY slide_id ORDER BY MIN(seq)",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list quiz slide ids", e))?;

        Ok(ids.into_iter().map(SlideId::from_uuid).collect())
    }

    async fn delete(&self, id: &QuizQuestionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM quiz_questions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("delete quiz question", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::QuizQuestionNotFound,
                format!("Quiz question not found: {}", id),
            ));
        }
        Ok(())
    }
}

fn row_to_question(row: &PgRow) -> Result<QuizQuestion, DomainError> {
    Ok(QuizQuestion {
        id: QuizQuestionId::from_uuid(column(row, "id")?),
        question: column(row, "question")?,
        answer_choices: column(row, "answer_choices")?,
        answer: column(row, "answer")?,
        rationale: column(row, "rationale")?,
        slide_id: SlideId::from_uuid(column(row, "slide_id")?),
        slide_image_id: SlideImageId::from_uuid(column(row, "slide_image_id")?),
    })
}
