//! Service Request Model
//!
//! A repair ticket. The requester is either a registered account or an
//! anonymous walk-in customer; the shared device/lifecycle fields are hoisted
//! into [`ServiceRequest`] so consumers only branch on [`Requester`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{AccountSummary, StatusUpdate, TrackingCode};
use crate::error::{AppError, ErrorCode};

// =============================================================================
// Status
// =============================================================================

/// Ticket lifecycle status
///
/// Wire and storage values are the SCREAMING_SNAKE_CASE names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ServiceStatus {
    Pending,
    Approved,
    InProgress,
    Completed,
    Rejected,
}

impl ServiceStatus {
    pub const ALL: [ServiceStatus; 5] = [
        ServiceStatus::Pending,
        ServiceStatus::Approved,
        ServiceStatus::InProgress,
        ServiceStatus::Completed,
        ServiceStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Pending => "PENDING",
            ServiceStatus::Approved => "APPROVED",
            ServiceStatus::InProgress => "IN_PROGRESS",
            ServiceStatus::Completed => "COMPLETED",
            ServiceStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceStatus {
    type Err = AppError;

    /// Exact wire values only
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::InvalidStatus,
                    format!("Invalid status: {s}"),
                )
                .with_detail("status", s)
            })
    }
}

// =============================================================================
// Requester (dual identity)
// =============================================================================

/// Contact details of an anonymous customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Who a ticket belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Requester {
    Registered { owner: AccountSummary },
    Anonymous { contact: ContactInfo },
}

impl Requester {
    pub fn owner_id(&self) -> Option<i64> {
        match self {
            Requester::Registered { owner } => Some(owner.id),
            Requester::Anonymous { .. } => None,
        }
    }

    /// Display name + email, whichever variant
    pub fn search_fields(&self) -> [&str; 2] {
        match self {
            Requester::Registered { owner } => [&owner.username, &owner.email],
            Requester::Anonymous { contact } => [&contact.name, &contact.email],
        }
    }

    pub fn display_name(&self) -> &str {
        self.search_fields()[0]
    }
}

// =============================================================================
// Device
// =============================================================================

/// Device and problem description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(default)]
    pub device_type: String,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    pub problem_category: String,
    pub problem: String,
    #[serde(default)]
    pub additional_notes: Option<String>,
}

// =============================================================================
// Ticket
// =============================================================================

/// Service request (ticket)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: i64,
    pub tracking_code: TrackingCode,
    pub requester: Requester,
    #[serde(flatten)]
    pub device: DeviceInfo,
    /// Return address given at submission, if any
    pub return_address: Option<String>,
    pub status: ServiceStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Addresses surfaced only in particular states
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logistics {
    /// Where the customer ships the device (APPROVED)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_address: Option<String>,
    /// Where the repaired device is returned (COMPLETED)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_address: Option<String>,
}

impl ServiceRequest {
    pub fn owner_id(&self) -> Option<i64> {
        self.requester.owner_id()
    }

    /// Return address: explicit one first, then the anonymous contact's
    pub fn customer_address(&self) -> Option<&str> {
        self.return_address.as_deref().or(match &self.requester {
            Requester::Anonymous { contact } => Some(contact.address.as_str()),
            Requester::Registered { .. } => None,
        })
    }

    /// Logistics view for the current status
    pub fn logistics(&self, service_address: &str) -> Logistics {
        match self.status {
            ServiceStatus::Approved => Logistics {
                service_address: Some(service_address.to_string()),
                customer_address: None,
            },
            ServiceStatus::Completed => Logistics {
                service_address: None,
                customer_address: self.customer_address().map(str::to_string),
            },
            ServiceStatus::Pending | ServiceStatus::InProgress | ServiceStatus::Rejected => {
                Logistics::default()
            }
        }
    }
}

/// Ticket with its history (newest entry first) and logistics view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestDetail {
    #[serde(flatten)]
    pub request: ServiceRequest,
    pub status_updates: Vec<StatusUpdate>,
    #[serde(flatten)]
    pub logistics: Logistics,
}

/// Result of an accepted status transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionOutcome {
    pub service_request: ServiceRequest,
    pub status_update: StatusUpdate,
}

// =============================================================================
// Creation
// =============================================================================

/// Owner of a ticket being created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewRequester {
    Account(i64),
    Guest(ContactInfo),
}

/// A validated ticket draft; status is always PENDING on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceRequest {
    pub requester: NewRequester,
    pub device: DeviceInfo,
    pub return_address: Option<String>,
}

impl NewServiceRequest {
    pub fn registered(owner_id: i64, device: DeviceInfo, return_address: Option<String>) -> Self {
        Self {
            requester: NewRequester::Account(owner_id),
            device,
            return_address,
        }
    }

    pub fn anonymous(contact: ContactInfo, device: DeviceInfo) -> Self {
        Self {
            requester: NewRequester::Guest(contact),
            device,
            return_address: None,
        }
    }

    /// Build from loosely-typed input, rejecting both/neither requester
    pub fn from_parts(
        owner_id: Option<i64>,
        contact: Option<ContactInfo>,
        device: DeviceInfo,
        return_address: Option<String>,
    ) -> Result<Self, AppError> {
        match (owner_id, contact) {
            (Some(owner_id), None) => Ok(Self::registered(owner_id, device, return_address)),
            (None, Some(contact)) => Ok(Self {
                return_address,
                ..Self::anonymous(contact, device)
            }),
            (Some(_), Some(_)) => Err(AppError::with_message(
                ErrorCode::AmbiguousRequester,
                "A ticket cannot have both an owner account and anonymous contact details",
            )
            .with_detail("requester", "ambiguous")),
            (None, None) => Err(AppError::with_message(
                ErrorCode::AmbiguousRequester,
                "A ticket needs either an owner account or anonymous contact details",
            )
            .with_detail("requester", "missing")),
        }
    }
}

/// `POST /service-requests` body (registered customer)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredRequestCreate {
    #[serde(flatten)]
    pub device: DeviceInfo,
    #[serde(default)]
    pub return_address: Option<String>,
}

/// `POST /service-requests/anonymous` body (walk-in customer)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousRequestCreate {
    #[serde(flatten)]
    pub contact: ContactInfo,
    #[serde(flatten)]
    pub device: DeviceInfo,
}

/// `POST /admin/service-requests` body (staff intake at the counter)
///
/// Staff either attach the ticket to an existing account (`ownerId`) or
/// record a walk-in's `contact`; exactly one must be given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRequestCreate {
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub contact: Option<ContactInfo>,
    #[serde(flatten)]
    pub device: DeviceInfo,
    #[serde(default)]
    pub return_address: Option<String>,
}

// =============================================================================
// Queries
// =============================================================================

/// `GET /service-requests` query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `GET /service-requests/track` query string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackQuery {
    pub code: String,
}
