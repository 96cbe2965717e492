//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ServiceRequestNotFound
            | Self::TrackingCodeNotFound
            | Self::AccountNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::TrackingCodeConflict => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::AdminRequired | Self::NotRequestOwner => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::DatabaseError | Self::TrackingCodeExhausted => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation / malformed input)
            Self::ValidationFailed | Self::InvalidStatus | Self::AmbiguousRequester => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}
