//! Admin dashboard
//!
//! Ticket counters plus a newest-first feed merged from tickets, accounts,
//! blog posts and contact messages. Read-only.

use shared::models::{ActivityItem, ActivityKind, DashboardStats, ServiceStatus};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{account, activity, service_request};
use crate::utils::AppResult;

/// Upper bound on feed length
pub const MAX_ACTIVITY_LIMIT: usize = 50;

/// Admin dashboard
///
/// `limit` is clamped to `1..=MAX_ACTIVITY_LIMIT`.
pub async fn overview(
    pool: &SqlitePool,
    actor: &CurrentUser,
    limit: usize,
) -> AppResult<DashboardStats> {
    actor.require_admin("dashboard.view")?;

    let limit = limit.clamp(1, MAX_ACTIVITY_LIMIT);
    let fetch = limit as i64;

    let total_requests = service_request::count_all(pool).await?;
    let pending_requests = service_request::count_by_status(pool, ServiceStatus::Pending).await?;

    let mut items: Vec<ActivityItem> = Vec::with_capacity(limit * 4);

    items.extend(
        service_request::find_recent(pool, fetch)
            .await?
            .into_iter()
            .map(|r| ActivityItem {
                kind: ActivityKind::ServiceRequest,
                title: format!("New service request {}", r.tracking_code),
                summary: format!(
                    "{}: {} {}",
                    r.requester.display_name(),
                    r.device.brand,
                    r.device.model
                ),
                link: format!("/admin/service-requests/{}", r.id),
                occurred_at: r.created_at,
            }),
    );

    items.extend(
        account::find_recent(pool, fetch)
            .await?
            .into_iter()
            .map(|a| ActivityItem {
                kind: ActivityKind::Account,
                title: "New account registered".to_string(),
                summary: format!("{} ({})", a.username, a.email),
                link: format!("/admin/users/{}", a.id),
                occurred_at: a.created_at,
            }),
    );

    items.extend(
        activity::find_recent_blog_posts(pool, fetch)
            .await?
            .into_iter()
            .map(|p| ActivityItem {
                kind: ActivityKind::BlogPost,
                title: "Blog post published".to_string(),
                summary: p.title,
                link: format!("/admin/blog/{}", p.id),
                occurred_at: p.created_at,
            }),
    );

    items.extend(
        activity::find_recent_contact_messages(pool, fetch)
            .await?
            .into_iter()
            .map(|m| ActivityItem {
                kind: ActivityKind::ContactMessage,
                title: "New contact message".to_string(),
                summary: format!("{}: {}", m.name, m.subject),
                link: format!("/admin/messages/{}", m.id),
                occurred_at: m.created_at,
            }),
    );

    Ok(DashboardStats {
        total_requests,
        pending_requests,
        recent_activity: merge_newest_first(items, limit),
    })
}

/// Stable sort by time descending, then truncate
fn merge_newest_first(mut items: Vec<ActivityItem>, limit: usize) -> Vec<ActivityItem> {
    items.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    items.truncate(limit);
    items
}
