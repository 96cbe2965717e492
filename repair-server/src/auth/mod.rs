//! 认证授权模块
//!
//! - [`JwtService`] - JWT 令牌校验
//! - [`CurrentUser`] - 已登录调用方
//! - [`Principal`] - 可能匿名的调用方

pub mod extractor;
pub mod jwt;
pub mod principal;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use principal::Principal;
