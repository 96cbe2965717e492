//! Account Repository
//!
//! Accounts are owned by the user-management service; the portal only reads
//! them.

use super::RepoResult;
use shared::models::Account;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, username, email, role, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(&format!("SELECT {COLUMNS} FROM account WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(account)
}

/// Newest first
pub async fn find_recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<Account>> {
    let accounts = sqlx::query_as::<_, Account>(&format!(
        "SELECT {COLUMNS} FROM account ORDER BY created_at DESC, id DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(accounts)
}
