//! Status Update Model
//!
//! One immutable entry of a ticket's status history.

use serde::{Deserialize, Serialize};

use super::ServiceStatus;

/// Status history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub id: i64,
    pub service_request_id: i64,
    /// The status transitioned *to*
    pub status: ServiceStatus,
    pub note: Option<String>,
    pub created_at: i64,
}

/// Status change payload (`PATCH /service-requests/{id}`)
///
/// `status` stays a raw string so that unknown values surface as an
/// invalid-status error instead of a generic body rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
}
