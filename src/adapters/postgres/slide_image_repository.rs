//! PostgreSQL implementation of SlideImageRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::column;
use crate::domain::catalog::SlideImage;
use crate::domain::foundation::{DomainError, ErrorCode, SlideId, SlideImageId, Timestamp};
use crate::ports::SlideImageRepository;

#[derive(Clone)]
pub struct PostgresSlideImageRepository {
    pool: PgPool,
}

impl PostgresSlideImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_IMAGE: &str = r#"
    SELECT id, slide_id, image_url, sort_order, generated_text, audio_url,
           created_at, updated_at
    FROM slide_images
"#;

#[async_trait]
impl SlideImageRepository for PostgresSlideImageRepository {
    async fn save(&self, image: &SlideImage) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO slide_images (
                id, slide_id, image_url, sort_order, generated_text, audio_url,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(image.id.as_uuid())
        .bind(image.slide_id.as_uuid())
        .bind(&image.image_url)
        .bind(image.order)
        .bind(&image.generated_text)
        .bind(&image.audio_url)
        .bind(image.created_at.as_datetime())
        .bind(image.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let duplicate_order = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if duplicate_order {
                DomainError::new(
                    ErrorCode::ValidationFailed,
                    format!(
                        "Slide image order {} already exists for slide {}",
                        image.order, image.slide_id
                    ),
                )
            } else {
                DomainError::database("insert slide image", e)
            }
        })?;

        Ok(())
    }

    async fn update(&self, image: &SlideImage) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE slide_images SET
                image_url = $2,
                sort_order = $3,
                generated_text = $4,
                audio_url = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(image.id.as_uuid())
        .bind(&image.image_url)
        .bind(image.order)
        .bind(&image.generated_text)
        .bind(&image.audio_url)
        .bind(image.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("update slide image", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SlideImageNotFound,
                format!("Slide image not found: {}", image.id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &SlideImageId) -> Result<Option<SlideImage>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_IMAGE))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("fetch slide image", e))?;

        row.as_ref().map(row_to_image).transpose()
    }

    async fn find_by_slide(&self, slide_id: &SlideId) -> Result<Vec<SlideImage>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE slide_id = $1 ORDER BY sort_order",
            SELECT_IMAGE
        ))
        .bind(slide_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list slide images", e))?;

        rows.iter().map(row_to_image).collect()
    }

    async fn delete_by_slide(&self, slide_id: &SlideId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM slide_images WHERE slide_id = $1")
            .bind(slide_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("delete slide images", e))?;

        Ok(result.rows_affected())
    }
}

fn row_to_image(row: &PgRow) -> Result<SlideImage, DomainError> {
    Ok(SlideImage {
        id: SlideImageId::from_uuid(column(row, "id")?),
        slide_id: SlideId::from_uuid(column(row, "slide_id")?),
        image_url: column(row, "image_url")?,
        order: column(row, "sort_order")?,
        generated_text: column(row, "generated_text")?,
        audio_url: column(row, "audio_url")?,
        created_at: Timestamp::from_datetime(column(row, "created_at")?),
        updated_at: Timestamp::from_datetime(column(row, "updated_at")?),
    })
}
