//! Dashboard API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use shared::models::{DashboardQuery, DashboardStats};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::dashboard;
use crate::utils::AppResult;

/// GET /admin/dashboard?limit= - 计数与最近活动
pub async fn overview(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardStats>> {
    let limit = query.limit.unwrap_or(state.config.activity_feed_limit);
    let stats = dashboard::overview(&state.pool, &user, limit).await?;
    Ok(Json(stats))
}
