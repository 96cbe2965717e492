//! Ticket status state machine
//!
//! Any status may move to any status, including itself and backwards; staff
//! use this to correct mistakes. Every accepted move appends exactly one
//! history entry, written in the same transaction as the ticket update and
//! stamped with the same instant.

use shared::ErrorCode;
use shared::models::{ServiceStatus, TransitionOutcome};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{RepoError, service_request, status_update};
use crate::utils::validation::MAX_NOTE_LEN;
use crate::utils::{AppError, AppResult};

/// Authorization, then target parsing; nothing is read from storage
pub fn validate(actor: &CurrentUser, raw_status: &str) -> AppResult<ServiceStatus> {
    actor.require_admin("service_request.transition")?;
    raw_status.parse()
}

/// Note stored verbatim; blank means no note
pub fn normalize_note(note: Option<String>) -> AppResult<Option<String>> {
    let note = note.filter(|n| !n.trim().is_empty());
    if let Some(n) = &note
        && n.chars().count() > MAX_NOTE_LEN
    {
        return Err(AppError::validation(format!(
            "note is too long ({} chars, max {MAX_NOTE_LEN})",
            n.chars().count()
        ))
        .with_detail("note", "too long"));
    }
    Ok(note)
}

/// Apply a transition
///
/// Order of checks: admin role, target value, ticket existence. The first
/// statement inside the transaction is the ticket UPDATE, so the write lock
/// is taken before anything is read; concurrent callers queue on the busy
/// timeout and the last one to commit wins.
pub async fn transition(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    raw_status: &str,
    note: Option<String>,
) -> AppResult<TransitionOutcome> {
    let target = validate(actor, raw_status)?;
    let note = normalize_note(note)?;

    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    let Some(stamp) = service_request::update_status(&mut tx, id, target, now_millis()).await?
    else {
        return Err(AppError::new(ErrorCode::ServiceRequestNotFound));
    };
    let previous = status_update::find_latest(&mut *tx, id)
        .await?
        .map(|update| update.status);
    let status_update =
        status_update::insert(&mut tx, id, target, note.as_deref(), stamp).await?;

    let service_request = service_request::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::database("Ticket vanished inside transaction"))?;

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        service_request_id = id,
        from = ?previous,
        to = %target,
        actor_id = actor.id,
        "Service request status changed"
    );

    Ok(TransitionOutcome {
        service_request,
        status_update,
    })
}
