//! JWT Extractors
//!
//! `CurrentUser` requires a valid bearer token. `Principal` treats a missing
//! header as anonymous, but a present and invalid token is still rejected.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, JwtError, JwtService, Principal};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Validate the Authorization header if present
///
/// `Ok(None)` means no header at all.
fn authenticate(parts: &mut Parts, state: &ServerState) -> Result<Option<CurrentUser>, AppError> {
    // Check if already extracted
    if let Some(user) = parts.extensions.get::<CurrentUser>() {
        return Ok(Some(user.clone()));
    }

    let Some(header) = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return Ok(None);
    };

    let token = JwtService::extract_from_header(header).ok_or_else(|| {
        security_log!("WARN", "auth_bad_header", uri = format!("{:?}", parts.uri));
        AppError::invalid_token("Invalid authorization header")
    })?;

    let user = state
        .get_jwt_service()
        .validate_token(token)
        .and_then(CurrentUser::try_from)
        .map_err(|e| {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", parts.uri)
            );
            match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            }
        })?;

    // Store in extensions for potential reuse
    parts.extensions.insert(user.clone());
    Ok(Some(user))
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(parts, state)? {
            Some(user) => Ok(user),
            None => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                Err(AppError::unauthorized())
            }
        }
    }
}

impl FromRequestParts<ServerState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        Ok(match authenticate(parts, state)? {
            Some(user) => Principal::Registered(user),
            None => Principal::Anonymous,
        })
    }
}
