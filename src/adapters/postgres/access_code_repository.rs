//! PostgreSQL implementation of AccessCodeRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::column;
use crate::domain::account::AccessCode;
use crate::domain::foundation::{AccessCodeId, DomainError, ErrorCode};
use crate::ports::AccessCodeRepository;

#[derive(Clone)]
pub struct PostgresAccessCodeRepository {
    pool: PgPool,
}

impl PostgresAccessCodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessCodeRepository for PostgresAccessCodeRepository {
    async fn save(&self, code: &AccessCode) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO access_codes (id, code, used) VALUES ($1, $2, $3)")
            .bind(code.id.as_uuid())
            .bind(&code.code)
            .bind(code.used)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("insert access code", e))?;

        Ok(())
    }

    async fn update(&self, code: &AccessCode) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE access_codes SET code = $2, used = $3 WHERE id = $1")
            .bind(code.id.as_uuid())
            .bind(&code.code)
            .bind(code.used)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("update access code", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AccessCodeNotFound,
                format!("Access code not found: {}", code.id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &AccessCodeId) -> Result<Option<AccessCode>, DomainError> {
        let row = sqlx::query("SELECT id, code, used FROM access_codes WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("fetch access code", e))?;

        row.as_ref().map(row_to_code).transpose()
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<AccessCode>, DomainError> {
        let row = sqlx::query("SELECT id, code, used FROM access_codes WHERE code = $1 LIMIT 1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("fetch access code by value", e))?;

        row.as_ref().map(row_to_code).transpose()
    }

    async fn find_all(&self) -> Result<Vec<AccessCode>, DomainError> {
        let rows = sqlx::query("SELECT id, code, used FROM access_codes")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("list access codes", e))?;

        rows.iter().map(row_to_code).collect()
    }

    async fn delete(&self, id: &AccessCodeId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM access_codes WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("delete access code", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AccessCodeNotFound,
                format!("Access code not found: {}", id),
            ));
        }
        Ok(())
    }
}

fn row_to_code(row: &PgRow) -> Result<AccessCode, DomainError> {
    Ok(AccessCode {
        id: AccessCodeId::from_uuid(column(row, "id")?),
        code: column(row, "code")?,
        used: column(row, "used")?,
    })
}
