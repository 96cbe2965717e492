//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`service_requests`] - 工单提交、查询、追踪、状态流转
//! - [`dashboard`] - 管理员概览
//! - [`json`] - JSON 请求体提取 (统一校验错误)

pub mod dashboard;
pub mod health;
pub mod json;
pub mod service_requests;

use axum::Router;

use crate::core::ServerState;

/// All routes, state not yet applied
pub fn router() -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Service request API - mixed public / customer / admin
        .merge(service_requests::router())
        // Dashboard API - admin
        .merge(dashboard::router())
}
