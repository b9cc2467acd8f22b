//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::column;
use crate::domain::account::User;
use crate::domain::foundation::{
    DomainError, ErrorCode, SpaceId, Timestamp, UserId, UserRecordId,
};
use crate::ports::UserRepository;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_USER: &str = r#"
    SELECT id, user_id, first_name, last_name, email, school, space_ids,
           credits, access_code, created_at, updated_at
    FROM users
"#;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, user_id, first_name, last_name, email, school, space_ids,
                credits, access_code, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.user_id.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.school)
        .bind(space_uuids(&user.space_ids))
        .bind(user.credits)
        .bind(&user.access_code)
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("insert user", e))?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                first_name = $2,
                last_name = $3,
                email = $4,
                school = $5,
                space_ids = $6,
                credits = $7,
                access_code = $8,
                updated_at = $9
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.school)
        .bind(space_uuids(&user.space_ids))
        .bind(user.credits)
        .bind(&user.access_code)
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.user_id),
            ));
        }
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE user_id = $1", SELECT_USER))
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("fetch user", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at", SELECT_USER))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("list users", e))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user_id),
            ));
        }
        Ok(())
    }
}

fn space_uuids(ids: &[SpaceId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let user_id: String = column(row, "user_id")?;
    let space_ids: Vec<Uuid> = column(row, "space_ids")?;

    Ok(User {
        id: UserRecordId::from_uuid(column(row, "id")?),
        user_id: UserId::new(user_id)
            .map_err(|e| DomainError::database("read column user_id", e))?,
        first_name: column(row, "first_name")?,
        last_name: column(row, "last_name")?,
        email: column(row, "email")?,
        school: column(row, "school")?,
        space_ids: space_ids.into_iter().map(SpaceId::from_uuid).collect(),
        credits: column(row, "credits")?,
        access_code: column(row, "access_code")?,
        created_at: Timestamp::from_datetime(column(row, "created_at")?),
        updated_at: Timestamp::from_datetime(column(row, "updated_at")?),
    })
}
