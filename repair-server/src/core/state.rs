use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, ServerError};
use crate::db::DbService;
use crate::service_requests::ServiceRequestService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// Cheap to clone: the pool and services are reference counted.
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | jwt_service | JWT 校验 |
/// | service_requests | 工单服务 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub service_requests: ServiceRequestService,
}

impl ServerState {
    /// 使用已打开的连接池创建状态
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let service_requests =
            ServiceRequestService::new(pool.clone(), config.service_address.clone());
        Self {
            config,
            pool,
            jwt_service,
            service_requests,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 数据库目录
    /// 2. 数据库 (WAL + 迁移)
    /// 3. 各服务
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        config.ensure_database_dir()?;
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::new(config.clone(), db.pool))
    }

    /// Replace the ticket service (custom notifier or tracking-code source)
    pub fn with_service_requests(mut self, service_requests: ServiceRequestService) -> Self {
        self.service_requests = service_requests;
        self
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}
