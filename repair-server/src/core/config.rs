use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::ServerError;

/// Shop address shown to customers once their ticket is approved
pub const DEFAULT_SERVICE_ADDRESS: &str = "Repair Center, 1 Workshop Street";

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | DATABASE_PATH | {WORK_DIR}/database/repair.db | SQLite 文件 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | JWT_SECRET | (开发环境随机) | 至少 32 字符 |
/// | JWT_ISSUER / JWT_AUDIENCE / JWT_EXPIRATION_MINUTES | | 令牌校验 |
/// | SERVICE_ADDRESS | 见 [`DEFAULT_SERVICE_ADDRESS`] | 寄修地址 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | ACTIVITY_FEED_LIMIT | 10 | 后台最近活动条数 |
///
/// `LOG_LEVEL` and `LOG_DIR` are read earlier by `setup_environment`.
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/repair HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 寄修地址 (APPROVED 状态可见)
    pub service_address: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 后台最近活动默认条数
    pub activity_feed_limit: usize,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// Fails when the JWT secret is missing or too short outside development.
    pub fn from_env() -> Result<Self, ServerError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let jwt = JwtConfig::from_env(&environment).map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| default_database_path(&work_dir)),
            work_dir,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt,
            environment,
            service_address: std::env::var("SERVICE_ADDRESS")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SERVICE_ADDRESS.into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            activity_feed_limit: std::env::var("ACTIVITY_FEED_LIMIT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
        })
    }

    /// Fixed development config that ignores the environment
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16, jwt: JwtConfig) -> Self {
        let work_dir = work_dir.into();
        Self {
            database_path: default_database_path(&work_dir),
            work_dir,
            http_port,
            jwt,
            environment: "development".into(),
            service_address: DEFAULT_SERVICE_ADDRESS.into(),
            request_timeout_ms: 30000,
            activity_feed_limit: 10,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Create the database directory if needed
    pub fn ensure_database_dir(&self) -> std::io::Result<()> {
        match PathBuf::from(&self.database_path).parent() {
            Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
            _ => Ok(()),
        }
    }
}

fn default_database_path(work_dir: &str) -> String {
    PathBuf::from(work_dir)
        .join("database")
        .join("repair.db")
        .to_string_lossy()
        .into_owned()
}
