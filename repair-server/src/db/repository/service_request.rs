//! Service Request Repository
//!
//! Rows are read with a LEFT JOIN on `account` and converted into the
//! tagged [`Requester`] shape. A row that breaks the one-requester rule is
//! reported as a database error, never silently patched.

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{
    AccountSummary, ContactInfo, DeviceInfo, NewRequester, NewServiceRequest, Requester,
    ServiceRequest, ServiceStatus, TrackingCode,
};
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

const PURCHASE_DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT: &str = "SELECT sr.id, sr.tracking_code, sr.owner_id, \
    a.username AS owner_username, a.email AS owner_email, \
    sr.contact_name, sr.contact_email, sr.contact_phone, sr.contact_address, \
    sr.device_type, sr.brand, sr.model, sr.serial_number, sr.purchase_date, \
    sr.problem_category, sr.problem, sr.additional_notes, sr.return_address, \
    sr.status, sr.created_at, sr.updated_at \
    FROM service_request sr LEFT JOIN account a ON a.id = sr.owner_id";

const NEWEST_FIRST: &str = "ORDER BY sr.created_at DESC, sr.id DESC";

#[derive(Debug, sqlx::FromRow)]
struct ServiceRequestRow {
    id: i64,
    tracking_code: String,
    owner_id: Option<i64>,
    owner_username: Option<String>,
    owner_email: Option<String>,
    contact_name: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    contact_address: Option<String>,
    device_type: String,
    brand: String,
    model: String,
    serial_number: Option<String>,
    purchase_date: Option<String>,
    problem_category: String,
    problem: String,
    additional_notes: Option<String>,
    return_address: Option<String>,
    status: ServiceStatus,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<ServiceRequestRow> for ServiceRequest {
    type Error = RepoError;

    fn try_from(row: ServiceRequestRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |what: &str| RepoError::Database(format!("service_request {id}: {what}"));

        let requester = match (
            row.owner_id,
            row.contact_name,
            row.contact_email,
            row.contact_phone,
            row.contact_address,
        ) {
            (Some(owner_id), None, None, None, None) => Requester::Registered {
                owner: AccountSummary {
                    id: owner_id,
                    username: row.owner_username.ok_or_else(|| corrupt("owner account missing"))?,
                    email: row.owner_email.ok_or_else(|| corrupt("owner account missing"))?,
                },
            },
            (None, Some(name), Some(email), Some(phone), Some(address)) => Requester::Anonymous {
                contact: ContactInfo {
                    name,
                    email,
                    phone,
                    address,
                },
            },
            _ => return Err(corrupt("requester must be exactly one of owner or contact")),
        };

        let tracking_code =
            TrackingCode::parse(&row.tracking_code).map_err(|_| corrupt("malformed tracking code"))?;
        let purchase_date = row
            .purchase_date
            .map(|d| NaiveDate::parse_from_str(&d, PURCHASE_DATE_FORMAT))
            .transpose()
            .map_err(|_| corrupt("malformed purchase date"))?;

        Ok(ServiceRequest {
            id,
            tracking_code,
            requester,
            device: DeviceInfo {
                device_type: row.device_type,
                brand: row.brand,
                model: row.model,
                serial_number: row.serial_number,
                purchase_date,
                problem_category: row.problem_category,
                problem: row.problem,
                additional_notes: row.additional_notes,
            },
            return_address: row.return_address,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn convert_all(rows: Vec<ServiceRequestRow>) -> RepoResult<Vec<ServiceRequest>> {
    rows.into_iter().map(ServiceRequest::try_from).collect()
}

pub async fn find_by_id<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> RepoResult<Option<ServiceRequest>> {
    let row = sqlx::query_as::<_, ServiceRequestRow>(&format!("{SELECT} WHERE sr.id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    row.map(ServiceRequest::try_from).transpose()
}

pub async fn find_by_tracking_code(
    pool: &SqlitePool,
    code: &TrackingCode,
) -> RepoResult<Option<ServiceRequest>> {
    let row = sqlx::query_as::<_, ServiceRequestRow>(&format!("{SELECT} WHERE sr.tracking_code = ?"))
        .bind(code.as_str())
        .fetch_optional(pool)
        .await?;
    row.map(ServiceRequest::try_from).transpose()
}

/// Tickets of one account, newest first
pub async fn find_by_owner(pool: &SqlitePool, owner_id: i64) -> RepoResult<Vec<ServiceRequest>> {
    let rows = sqlx::query_as::<_, ServiceRequestRow>(&format!(
        "{SELECT} WHERE sr.owner_id = ? {NEWEST_FIRST}"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    convert_all(rows)
}

/// All tickets, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<ServiceRequest>> {
    let rows = sqlx::query_as::<_, ServiceRequestRow>(&format!("{SELECT} {NEWEST_FIRST}"))
        .fetch_all(pool)
        .await?;
    convert_all(rows)
}

pub async fn find_recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<ServiceRequest>> {
    let rows = sqlx::query_as::<_, ServiceRequestRow>(&format!("{SELECT} {NEWEST_FIRST} LIMIT ?"))
        .bind(limit)
        .fetch_all(pool)
        .await?;
    convert_all(rows)
}

/// Insert a PENDING ticket
///
/// A tracking-code (or id) collision surfaces as [`RepoError::Duplicate`].
pub async fn insert(
    conn: &mut SqliteConnection,
    id: i64,
    tracking_code: &TrackingCode,
    draft: &NewServiceRequest,
    now: i64,
) -> RepoResult<()> {
    let (owner_id, contact) = match &draft.requester {
        NewRequester::Account(owner_id) => (Some(*owner_id), None),
        NewRequester::Guest(contact) => (None, Some(contact)),
    };
    let device = &draft.device;

    sqlx::query(
        "INSERT INTO service_request (\
            id, tracking_code, owner_id, contact_name, contact_email, contact_phone, contact_address, \
            device_type, brand, model, serial_number, purchase_date, problem_category, problem, \
            additional_notes, return_address, status, created_at, updated_at\
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(tracking_code.as_str())
    .bind(owner_id)
    .bind(contact.map(|c| c.name.as_str()))
    .bind(contact.map(|c| c.email.as_str()))
    .bind(contact.map(|c| c.phone.as_str()))
    .bind(contact.map(|c| c.address.as_str()))
    .bind(&device.device_type)
    .bind(&device.brand)
    .bind(&device.model)
    .bind(device.serial_number.as_deref())
    .bind(
        device
            .purchase_date
            .map(|d| d.format(PURCHASE_DATE_FORMAT).to_string()),
    )
    .bind(&device.problem_category)
    .bind(&device.problem)
    .bind(device.additional_notes.as_deref())
    .bind(draft.return_address.as_deref())
    .bind(ServiceStatus::Pending)
    .bind(now)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

/// Set status and `updated_at`
///
/// Returns the stamp actually written, or `None` when the ticket does not
/// exist. `updated_at` never moves backwards, so a writer whose clock
/// reading is older than the last committed change still sorts after it.
pub async fn update_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: ServiceStatus,
    now: i64,
) -> RepoResult<Option<i64>> {
    let stamp = sqlx::query_scalar::<_, i64>(
        "UPDATE service_request SET status = ?, updated_at = MAX(updated_at, ?) WHERE id = ? RETURNING updated_at",
    )
    .bind(status)
    .bind(now)
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(stamp)
}

/// Delete a ticket; history goes with it (ON DELETE CASCADE)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM service_request WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn count_all(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM service_request")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_by_status(pool: &SqlitePool, status: ServiceStatus) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM service_request WHERE status = ?")
        .bind(status)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
