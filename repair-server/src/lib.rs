//! Repair Server - 维修服务门户后端
//!
//! # 架构概述
//!
//! - **工单** (`service_requests`): 状态机、追踪码、筛选、通知触发点
//! - **数据库** (`db`): SQLite (sqlx) 连接池与仓储
//! - **认证** (`auth`): JWT 解析出的调用方身份 ([`Principal`])
//! - **后台概览** (`dashboard`): 计数与最近活动
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! repair-server/src/
//! ├── core/              # 配置、状态、服务器、启动错误
//! ├── auth/              # JWT、调用方身份提取
//! ├── db/                # 连接池、迁移、仓储
//! ├── service_requests/  # 工单生命周期
//! ├── dashboard/         # 管理员概览
//! ├── api/               # HTTP 路由和处理器
//! └── utils/             # 日志、输入校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod dashboard;
pub mod db;
pub mod service_requests;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService, Principal};
pub use core::{Config, Server, ServerState};
pub use service_requests::ServiceRequestService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and initialize logging from `LOG_LEVEL` / `LOG_DIR`
pub fn setup_environment() -> Result<(), core::ServerError> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref())?;
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  ____                  _
 |  _ \ ___ _ __   __ _(_)_ __
 | |_) / _ \ '_ \ / _` | | '__|
 |  _ <  __/ |_) | (_| | | |
 |_| \_\___| .__/ \__,_|_|_|
           |_|   service portal
    "#
    );
}
