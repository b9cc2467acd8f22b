//! PostgreSQL implementation of SpaceRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::{column, in_requested_order};
use crate::domain::catalog::Space;
use crate::domain::foundation::{DomainError, ErrorCode, SpaceId, Timestamp};
use crate::ports::SpaceRepository;

#[derive(Clone)]
pub struct PostgresSpaceRepository {
    pool: PgPool,
}

impl PostgresSpaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_SPACE: &str = "SELECT id, name, created_at, updated_at FROM spaces";

#[async_trait]
impl SpaceRepository for PostgresSpaceRepository {
    async fn save(&self, space: &Space) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO spaces (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(space.id.as_uuid())
        .bind(&space.name)
        .bind(space.created_at.as_datetime())
        .bind(space.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("insert space", e))?;

        Ok(())
    }

    async fn update(&self, space: &Space) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE spaces SET name = $2, updated_at = $3 WHERE id = $1")
            .bind(space.id.as_uuid())
            .bind(&space.name)
            .bind(space.updated_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("update space", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SpaceNotFound,
                format!("Space not found: {}", space.id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &SpaceId) -> Result<Option<Space>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_SPACE))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("fetch space", e))?;

        row.as_ref().map(row_to_space).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Space>, DomainError> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at", SELECT_SPACE))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("list spaces", e))?;

        rows.iter().map(row_to_space).collect()
    }

    async fn find_by_ids(&self, ids: &[SpaceId]) -> Result<Vec<Space>, DomainError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query(&format!("{} WHERE id = ANY($1)", SELECT_SPACE))
            .bind(uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("fetch spaces by id", e))?;

        let spaces = rows.iter().map(row_to_space).collect::<Result<Vec<_>, _>>()?;
        Ok(in_requested_order(ids, spaces, |s| &s.id))
    }

    async fn delete(&self, id: &SpaceId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM spaces WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("delete space", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SpaceNotFound,
                format!("Space not found: {}", id),
            ));
        }
        Ok(())
    }
}

fn row_to_space(row: &PgRow) -> Result<Space, DomainError> {
    Ok(Space {
        id: SpaceId::from_uuid(column(row, "id")?),
        name: column(row, "name")?,
        created_at: Timestamp::from_datetime(column(row, "created_at")?),
        updated_at: Timestamp::from_datetime(column(row, "updated_at")?),
    })
}
