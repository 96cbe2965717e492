//! 调用方身份
//!
//! Routes that serve both guests and signed-in customers extract a
//! [`Principal`]; admin-only routes extract [`CurrentUser`] directly.

use shared::ErrorCode;

use crate::auth::CurrentUser;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Caller identity, resolved once per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// No bearer token
    Anonymous,
    /// Valid bearer token
    Registered(CurrentUser),
}

impl Principal {
    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            Principal::Anonymous => None,
            Principal::Registered(user) => Some(user),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(CurrentUser::is_admin)
    }

    /// Signed-in caller, or `NotAuthenticated`
    pub fn require_user(&self) -> AppResult<&CurrentUser> {
        self.user().ok_or_else(AppError::unauthorized)
    }
}

impl From<CurrentUser> for Principal {
    fn from(user: CurrentUser) -> Self {
        Principal::Registered(user)
    }
}

impl CurrentUser {
    /// `AdminRequired` unless the caller is an admin; denials go to the security log
    pub fn require_admin(&self, action: &str) -> AppResult<()> {
        if self.is_admin() {
            return Ok(());
        }
        security_log!(
            "WARN",
            "admin_required",
            user_id = self.id,
            username = self.username.clone(),
            action = action.to_string()
        );
        Err(AppError::new(ErrorCode::AdminRequired))
    }
}
