//! Unified error codes for the repair portal
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Service request errors
//! - 4xxx: Account errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Admin role required
    AdminRequired = 2003,
    /// Caller does not own the service request
    NotRequestOwner = 2006,

    // ==================== 3xxx: Service request ====================
    /// Service request not found (by id)
    ServiceRequestNotFound = 3001,
    /// No service request matches the tracking code
    TrackingCodeNotFound = 3002,
    /// Status value is outside the lifecycle enum
    InvalidStatus = 3003,
    /// Both or neither of owner and anonymous contact were supplied
    AmbiguousRequester = 3004,
    /// Tracking code collided with an existing ticket
    TrackingCodeConflict = 3005,
    /// Tracking code generation kept colliding
    TrackingCodeExhausted = 3006,

    // ==================== 4xxx: Account ====================
    /// Account not found
    AccountNotFound = 4001,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric error code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::NotRequestOwner => "Service request belongs to another account",

            // Service request
            ErrorCode::ServiceRequestNotFound => "Service request not found",
            ErrorCode::TrackingCodeNotFound => "No service request found for this tracking code",
            ErrorCode::InvalidStatus => "Invalid service request status",
            ErrorCode::AmbiguousRequester => {
                "Exactly one of owner account or contact details is required"
            }
            ErrorCode::TrackingCodeConflict => "Tracking code already in use",
            ErrorCode::TrackingCodeExhausted => "Could not allocate a unique tracking code",

            // Account
            ErrorCode::AccountNotFound => "Account not found",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when a numeric code does not map to an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2003 => Ok(ErrorCode::AdminRequired),
            2006 => Ok(ErrorCode::NotRequestOwner),

            // Service request
            3001 => Ok(ErrorCode::ServiceRequestNotFound),
            3002 => Ok(ErrorCode::TrackingCodeNotFound),
            3003 => Ok(ErrorCode::InvalidStatus),
            3004 => Ok(ErrorCode::AmbiguousRequester),
            3005 => Ok(ErrorCode::TrackingCodeConflict),
            3006 => Ok(ErrorCode::TrackingCodeExhausted),

            // Account
            4001 => Ok(ErrorCode::AccountNotFound),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
