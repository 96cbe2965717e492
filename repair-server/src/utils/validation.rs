//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits live here.

use shared::models::{ContactInfo, DeviceInfo};

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Names: customer name, brand, model, device type, problem category
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions (problem, additional notes, status note)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, serial number
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Search terms
pub const MAX_SEARCH_LEN: usize = 200;

// ── Single-field helpers ────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    validate_max_len(value, field, max_len)
}

/// Validate length only; empty is allowed.
pub fn validate_max_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_max_len(v, field, max_len),
        None => Ok(()),
    }
}

/// Required + shape check: one `@`, non-empty local part, dotted domain
pub fn validate_email(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;

    let valid = match value.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.trim().contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::validation(format!(
            "{field} must be a valid email address"
        )));
    }
    Ok(())
}

/// Trim; blank becomes `None`
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ── Multi-field collection ──────────────────────────────────────────

/// Collects per-field failures into one `ValidationFailed` error
///
/// Each failing field lands in `details` under its own name.
#[derive(Debug, Default)]
pub struct FieldErrors {
    error: Option<AppError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, field: &str, result: Result<(), AppError>) {
        if let Err(e) = result {
            let err = self
                .error
                .take()
                .unwrap_or_else(|| AppError::validation("Invalid request body"));
            self.error = Some(err.with_detail(field, e.message));
        }
    }

    pub fn finish(self) -> Result<(), AppError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Device/problem block shared by both submission forms
pub fn validate_device(device: &DeviceInfo, errors: &mut FieldErrors) {
    errors.record(
        "deviceType",
        validate_max_len(&device.device_type, "deviceType", MAX_NAME_LEN),
    );
    errors.record("brand", validate_required_text(&device.brand, "brand", MAX_NAME_LEN));
    errors.record("model", validate_required_text(&device.model, "model", MAX_NAME_LEN));
    errors.record(
        "serialNumber",
        validate_optional_text(&device.serial_number, "serialNumber", MAX_SHORT_TEXT_LEN),
    );
    errors.record(
        "problemCategory",
        validate_required_text(&device.problem_category, "problemCategory", MAX_NAME_LEN),
    );
    errors.record("problem", validate_required_text(&device.problem, "problem", MAX_NOTE_LEN));
    errors.record(
        "additionalNotes",
        validate_optional_text(&device.additional_notes, "additionalNotes", MAX_NOTE_LEN),
    );
}

/// Anonymous customer contact block
pub fn validate_contact(contact: &ContactInfo, errors: &mut FieldErrors) {
    errors.record("name", validate_required_text(&contact.name, "name", MAX_NAME_LEN));
    errors.record("email", validate_email(&contact.email, "email"));
    errors.record("phone", validate_required_text(&contact.phone, "phone", MAX_SHORT_TEXT_LEN));
    errors.record(
        "address",
        validate_required_text(&contact.address, "address", MAX_ADDRESS_LEN),
    );
}
