//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! One table per entity, no foreign keys. Array-valued fields are stored as
//! `TEXT[]` / `UUID[]`. Page order lives in `slide_images.sort_order`.

mod access_code_repository;
mod flashcard_repository;
mod quiz_question_repository;
mod slide_image_repository;
mod slide_repository;
mod space_repository;
mod user_repository;

pub use access_code_repository::PostgresAccessCodeRepository;
pub use flashcard_repository::PostgresFlashcardRepository;
pub use quiz_question_repository::PostgresQuizQuestionRepository;
pub use slide_image_repository::PostgresSlideImageRepository;
pub use slide_repository::PostgresSlideRepository;
pub use space_repository::PostgresSpaceRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, Row};

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens a pool against `url` and, when configured, applies pending
/// migrations.
pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(pool)
}

/// Reads one column, mapping decode failures to a database error.
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("read column {}", name), e))
}

/// Orders `found` by the position of each key in `requested`, dropping
/// keys that matched nothing.
fn in_requested_order<T, K: PartialEq>(
    requested: &[K],
    mut found: Vec<T>,
    key: impl Fn(&T) -> &K,
) -> Vec<T> {
    found.sort_by_key(|item| {
        requested
            .iter()
            .position(|k| k == key(item))
            .unwrap_or(usize::MAX)
    });
    found
}
