//! Repository Module
//!
//! Free async functions over a `SqlitePool` (or an open transaction), one
//! module per table.

pub mod account;
pub mod activity;
pub mod service_request;
pub mod status_update;

use shared::ErrorCode;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;

    use crate::db::DbService;

    pub async fn pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    pub async fn insert_account(pool: &SqlitePool, id: i64, username: &str, email: &str, role: &str, created_at: i64) {
        sqlx::query("INSERT INTO account (id, username, email, role, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(id)
            .bind(username)
            .bind(email)
            .bind(role)
            .bind(created_at)
            .execute(pool)
            .await
            .unwrap();
    }
}
