//! PostgreSQL implementation of SlideRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::{column, in_requested_order};
use crate::domain::catalog::Slide;
use crate::domain::foundation::{DomainError, ErrorCode, SlideId, SpaceId, Timestamp};
use crate::ports::SlideRepository;

#[derive(Clone)]
pub struct PostgresSlideRepository {
    pool: PgPool,
}

impl PostgresSlideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_SLIDE: &str = r#"
    SELECT id, name, pdf_url, space_id, generated_notes, created_at, updated_at
    FROM slides
"#;

#[async_trait]
impl SlideRepository for PostgresSlideRepository {
    async fn save(&self, slide: &Slide) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO slides (
                id, name, pdf_url, space_id, generated_notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(slide.id.as_uuid())
        .bind(&slide.name)
        .bind(&slide.pdf_url)
        .bind(slide.space_id.map(|id| *id.as_uuid()))
        .bind(&slide.generated_notes)
        .bind(slide.created_at.as_datetime())
        .bind(slide.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("insert slide", e))?;

        Ok(())
    }

    async fn update(&self, slide: &Slide) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE slides SET
                name = $2,
                pdf_url = $3,
                space_id = $4,
                generated_notes = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(slide.id.as_uuid())
        .bind(&slide.name)
        .bind(&slide.pdf_url)
        .bind(slide.space_id.map(|id| *id.as_uuid()))
        .bind(&slide.generated_notes)
        .bind(slide.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("update slide", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SlideNotFound,
                format!("Slide not found: {}", slide.id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &SlideId) -> Result<Option<Slide>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_SLIDE))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("fetch slide", e))?;

        row.as_ref().map(row_to_slide).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Slide>, DomainError> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at", SELECT_SLIDE))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("list slides", e))?;

        rows.iter().map(row_to_slide).collect()
    }

    async fn find_by_space(&self, space_id: &SpaceId) -> Result<Vec<Slide>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE space_id = $1 ORDER BY created_at",
            SELECT_SLIDE
        ))
        .bind(space_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list slides by space", e))?;

        rows.iter().map(row_to_slide).collect()
    }

    async fn find_by_ids(&self, ids: &[SlideId]) -> Result<Vec<Slide>, DomainError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query(&format!("{} WHERE id = ANY($1)", SELECT_SLIDE))
            .bind(uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("fetch slides by id", e))?;

        let slides = rows.iter().map(row_to_slide).collect::<Result<Vec<_>, _>>()?;
        Ok(in_requested_order(ids, slides, |s| &s.id))
    }

    async fn delete(&self, id: &SlideId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM slides WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("delete slide", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SlideNotFound,
                format!("Slide not found: {}", id),
            ));
        }
        Ok(())
    }
}

fn row_to_slide(row: &PgRow) -> Result<Slide, DomainError> {
    let space_id: Option<Uuid> = column(row, "space_id")?;

    Ok(Slide {
        id: SlideId::from_uuid(column(row, "id")?),
        name: column(row, "name")?,
        pdf_url: column(row, "pdf_url")?,
        space_id: space_id.map(SpaceId::from_uuid),
        generated_notes: column(row, "generated_notes")?,
        created_at: Timestamp::from_datetime(column(row, "created_at")?),
        updated_at: Timestamp::from_datetime(column(row, "updated_at")?),
    })
}
