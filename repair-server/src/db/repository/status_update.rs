//! Status Update Repository
//!
//! Append-only: there is no update or delete here. Rows disappear only with
//! their ticket.

use super::RepoResult;
use shared::models::{ServiceStatus, StatusUpdate};
use sqlx::{SqliteConnection, SqliteExecutor};

const COLUMNS: &str = "id, service_request_id, status, note, created_at";

/// Append a history entry
pub async fn insert(
    conn: &mut SqliteConnection,
    service_request_id: i64,
    status: ServiceStatus,
    note: Option<&str>,
    now: i64,
) -> RepoResult<StatusUpdate> {
    let update = sqlx::query_as::<_, StatusUpdate>(&format!(
        "INSERT INTO status_update (service_request_id, status, note, created_at) VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(service_request_id)
    .bind(status)
    .bind(note)
    .bind(now)
    .fetch_one(conn)
    .await?;
    Ok(update)
}

/// History of one ticket, newest first
pub async fn find_by_request<'e>(
    executor: impl SqliteExecutor<'e>,
    service_request_id: i64,
) -> RepoResult<Vec<StatusUpdate>> {
    let updates = sqlx::query_as::<_, StatusUpdate>(&format!(
        "SELECT {COLUMNS} FROM status_update WHERE service_request_id = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(service_request_id)
    .fetch_all(executor)
    .await?;
    Ok(updates)
}

pub async fn find_latest<'e>(
    executor: impl SqliteExecutor<'e>,
    service_request_id: i64,
) -> RepoResult<Option<StatusUpdate>> {
    let update = sqlx::query_as::<_, StatusUpdate>(&format!(
        "SELECT {COLUMNS} FROM status_update WHERE service_request_id = ? ORDER BY created_at DESC, id DESC LIMIT 1"
    ))
    .bind(service_request_id)
    .fetch_optional(executor)
    .await?;
    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;
    use sqlx::SqlitePool;

    async fn seed_ticket(pool: &SqlitePool, id: i64) {
        sqlx::query(
            "INSERT INTO service_request (id, tracking_code, contact_name, contact_email, contact_phone, contact_address, brand, model, problem_category, problem, created_at, updated_at) \
             VALUES (?, ?, 'n', 'e@x.com', 'p', 'a', 'b', 'm', 'c', 'p', 1, 1)",
        )
        .bind(id)
        .bind(format!("SRV-000000-{id:04}"))
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_history_newest_first_with_id_tiebreak() {
        let pool = test_support::pool().await;
        seed_ticket(&pool, 1).await;

        let mut conn = pool.acquire().await.unwrap();
        let first = insert(&mut conn, 1, ServiceStatus::Pending, None, 100).await.unwrap();
        // same millisecond: id decides
        let second = insert(&mut conn, 1, ServiceStatus::Approved, Some("Kargo onaylandı"), 100)
            .await
            .unwrap();
        drop(conn);

        assert_eq!(first.note, None);
        assert_eq!(second.note.as_deref(), Some("Kargo onaylandı"));

        let history = find_by_request(&pool, 1).await.unwrap();
        assert_eq!(
            history.iter().map(|u| u.id).collect::<Vec<_>>(),
            [second.id, first.id]
        );
        assert_eq!(find_latest(&pool, 1).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_history_cascades_with_ticket() {
        let pool = test_support::pool().await;
        seed_ticket(&pool, 1).await;
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, 1, ServiceStatus::Pending, None, 1).await.unwrap();
        drop(conn);

        sqlx::query("DELETE FROM service_request WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();
        assert!(find_by_request(&pool, 1).await.unwrap().is_empty());
        assert!(find_latest(&pool, 1).await.unwrap().is_none());
    }
}
