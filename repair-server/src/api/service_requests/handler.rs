//! Service Request API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use shared::ErrorCode;
use shared::models::{
    AnonymousRequestCreate, RegisteredRequestCreate, ServiceRequest, ServiceRequestDetail,
    ServiceRequestQuery, StaffRequestCreate, StatusChange, TrackQuery, TransitionOutcome,
};

use crate::api::json::AppJson;
use crate::auth::{CurrentUser, Principal};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// POST /service-requests - 已登录客户提交工单
pub async fn create_registered(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(payload): AppJson<RegisteredRequestCreate>,
) -> AppResult<(StatusCode, Json<ServiceRequestDetail>)> {
    let detail = state
        .service_requests
        .submit_registered(&user, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// POST /service-requests/anonymous - 匿名客户提交工单
pub async fn create_anonymous(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<AnonymousRequestCreate>,
) -> AppResult<(StatusCode, Json<ServiceRequestDetail>)> {
    let detail = state.service_requests.submit_anonymous(payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// POST /admin/service-requests - 前台代客登记 (账户或匿名联系人)
pub async fn create_intake(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(payload): AppJson<StaffRequestCreate>,
) -> AppResult<(StatusCode, Json<ServiceRequestDetail>)> {
    let detail = state.service_requests.submit_intake(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /service-requests?search=&status= - 工单列表
pub async fn list(
    State(state): State<ServerState>,
    principal: Principal,
    Query(query): Query<ServiceRequestQuery>,
) -> AppResult<Json<Vec<ServiceRequest>>> {
    let tickets = state.service_requests.list(&principal, &query).await?;
    Ok(Json(tickets))
}

/// GET /service-requests/track?code= - 追踪码查询
///
/// A missing `code` parameter gets the same answer as an unknown code.
pub async fn track(
    State(state): State<ServerState>,
    query: Result<Query<TrackQuery>, QueryRejection>,
) -> AppResult<Json<ServiceRequestDetail>> {
    let Ok(Query(TrackQuery { code })) = query else {
        return Err(AppError::new(ErrorCode::TrackingCodeNotFound));
    };
    let detail = state.service_requests.track(&code).await?;
    Ok(Json(detail))
}

/// GET /service-requests/{id} - 工单详情 (含历史)
pub async fn get_by_id(
    State(state): State<ServerState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ServiceRequestDetail>> {
    let detail = state.service_requests.get(&principal, id).await?;
    Ok(Json(detail))
}

/// PATCH /service-requests/{id} - 状态流转
pub async fn change_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<StatusChange>,
) -> AppResult<Json<TransitionOutcome>> {
    let outcome = state.service_requests.transition(&user, id, payload).await?;
    Ok(Json(outcome))
}

/// DELETE /service-requests/{id} - 删除工单
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = state.service_requests.delete(&user, id).await?;
    Ok(Json(deleted))
}
