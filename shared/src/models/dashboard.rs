//! Dashboard Model
//!
//! Admin overview: ticket counters plus a merged recent-activity feed.

use serde::{Deserialize, Serialize};

/// Source of an activity feed entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    ServiceRequest,
    Account,
    BlogPost,
    ContactMessage,
}

/// One entry of the recent-activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub title: String,
    pub summary: String,
    /// Admin UI path of the underlying record
    pub link: String,
    pub occurred_at: i64,
}

/// `GET /admin/dashboard` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_requests: i64,
    pub pending_requests: i64,
    pub recent_activity: Vec<ActivityItem>,
}

/// `GET /admin/dashboard` query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_wire_shape() {
        let stats = DashboardStats {
            total_requests: 3,
            pending_requests: 1,
            recent_activity: vec![ActivityItem {
                kind: ActivityKind::BlogPost,
                title: "Yeni blog yazısı".into(),
                summary: "Batarya bakımı".into(),
                link: "/admin/blog/1".into(),
                occurred_at: 5,
            }],
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalRequests"], 3);
        assert_eq!(json["pendingRequests"], 1);
        assert_eq!(json["recentActivity"][0]["kind"], "blog_post");
        assert_eq!(json["recentActivity"][0]["occurredAt"], 5);
    }
}
