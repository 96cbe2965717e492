//! Data models
//!
//! Shared between repair-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod account;
pub mod dashboard;
pub mod service_request;
pub mod status_update;
pub mod tracking_code;

// Re-exports
pub use account::*;
pub use dashboard::*;
pub use service_request::*;
pub use status_update::*;
pub use tracking_code::*;
