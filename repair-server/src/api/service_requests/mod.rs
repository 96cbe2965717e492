//! Service Request API 模块
//!
//! | 路径 | 方法 | 认证 |
//! |------|------|------|
//! | /service-requests | POST | 已登录客户 |
//! | /service-requests/anonymous | POST | 无 |
//! | /service-requests | GET | 已登录 (客户: 本人; 管理员: 全部) |
//! | /service-requests/track?code= | GET | 无 |
//! | /service-requests/{id} | GET | 本人或管理员 |
//! | /service-requests/{id} | PATCH / DELETE | 管理员 |
//! | /admin/service-requests | POST | 管理员 (前台登记) |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/service-requests", routes())
        .route("/admin/service-requests", post(handler::create_intake))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create_registered))
        .route("/anonymous", post(handler::create_anonymous))
        .route("/track", get(handler::track))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::change_status)
                .delete(handler::delete),
        )
}
