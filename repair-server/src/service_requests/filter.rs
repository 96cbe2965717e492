//! Ticket query/filter engine
//!
//! Pure in-memory filtering over already-authorized ticket lists.

use shared::models::{ServiceRequest, ServiceRequestQuery, ServiceStatus};

use crate::utils::validation::{MAX_SEARCH_LEN, validate_max_len};
use crate::utils::{AppError, AppResult};

/// Parsed search criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    /// Lower-cased, trimmed; `None` matches everything
    search: Option<String>,
    status: Option<ServiceStatus>,
}

impl TicketFilter {
    pub fn new(search: Option<&str>, status: Option<ServiceStatus>) -> Self {
        Self {
            search: search
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
            status,
        }
    }

    /// From `?search=&status=`; an empty status means no status filter
    pub fn from_query(query: &ServiceRequestQuery) -> AppResult<Self> {
        if let Some(search) = &query.search {
            validate_max_len(search, "search", MAX_SEARCH_LEN)
                .map_err(|e| e.with_detail("search", "too long"))?;
        }

        let status = match query.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<ServiceStatus>().map_err(|_| {
                AppError::validation(format!("Unknown status filter: {raw}"))
                    .with_detail("status", "must be one of PENDING, APPROVED, IN_PROGRESS, COMPLETED, REJECTED")
            })?),
        };

        Ok(Self::new(query.search.as_deref(), status))
    }

    pub fn matches(&self, ticket: &ServiceRequest) -> bool {
        if let Some(status) = self.status
            && ticket.status != status
        {
            return false;
        }

        let Some(term) = &self.search else {
            return true;
        };

        let device = &ticket.device;
        [
            device.device_type.as_str(),
            device.brand.as_str(),
            device.model.as_str(),
        ]
        .into_iter()
        .chain(ticket.requester.search_fields())
        .any(|field| field.to_lowercase().contains(term.as_str()))
    }

    /// Keep matching tickets, preserving order
    pub fn apply(&self, tickets: Vec<ServiceRequest>) -> Vec<ServiceRequest> {
        tickets.into_iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;
    use shared::models::{AccountSummary, ContactInfo, DeviceInfo, Requester, TrackingCode};

    fn ticket(id: i64, requester: Requester, brand: &str, status: ServiceStatus) -> ServiceRequest {
        ServiceRequest {
            id,
            tracking_code: TrackingCode::from_parts(1, id as u32),
            requester,
            device: DeviceInfo {
                device_type: "phone".into(),
                brand: brand.into(),
                model: "Model X".into(),
                serial_number: Some("HIDDEN-SERIAL".into()),
                purchase_date: None,
                problem_category: "screen".into(),
                problem: "broken".into(),
                additional_notes: None,
            },
            return_address: None,
            status,
            created_at: id,
            updated_at: id,
        }
    }

    fn anonymous(name: &str, email: &str) -> Requester {
        Requester::Anonymous {
            contact: ContactInfo {
                name: name.into(),
                email: email.into(),
                phone: "555".into(),
                address: "addr".into(),
            },
        }
    }

    fn registered(username: &str, email: &str) -> Requester {
        Requester::Registered {
            owner: AccountSummary {
                id: 9,
                username: username.into(),
                email: email.into(),
            },
        }
    }

    fn tickets() -> Vec<ServiceRequest> {
        vec![
            ticket(1, anonymous("Ayşe", "ayse@x.com"), "Apple", ServiceStatus::Pending),
            ticket(2, registered("mehmet", "m@corp.com"), "Samsung", ServiceStatus::Approved),
            ticket(3, anonymous("Veli", "veli@x.com"), "Xiaomi", ServiceStatus::Pending),
        ]
    }

    fn ids(list: &[ServiceRequest]) -> Vec<i64> {
        list.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_blank_search_matches_all() {
        assert_eq!(ids(&TicketFilter::new(Some("   "), None).apply(tickets())), [1, 2, 3]);
        assert_eq!(ids(&TicketFilter::default().apply(tickets())), [1, 2, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_device_and_requester() {
        let by_brand = TicketFilter::new(Some("sAmSuNg"), None).apply(tickets());
        assert_eq!(ids(&by_brand), [2]);

        let by_contact_email = TicketFilter::new(Some("VELI@X"), None).apply(tickets());
        assert_eq!(ids(&by_contact_email), [3]);

        let by_owner = TicketFilter::new(Some("corp.com"), None).apply(tickets());
        assert_eq!(ids(&by_owner), [2]);

        let by_unicode_name = TicketFilter::new(Some("AYŞE"), None).apply(tickets());
        assert_eq!(ids(&by_unicode_name), [1]);
    }

    #[test]
    fn test_search_ignores_unlisted_fields() {
        assert!(TicketFilter::new(Some("HIDDEN-SERIAL"), None).apply(tickets()).is_empty());
        assert!(TicketFilter::new(Some("555"), None).apply(tickets()).is_empty());
    }

    #[test]
    fn test_status_and_search_combine() {
        let pending = TicketFilter::new(None, Some(ServiceStatus::Pending)).apply(tickets());
        assert_eq!(ids(&pending), [1, 3]);

        let both = TicketFilter::new(Some("x.com"), Some(ServiceStatus::Pending)).apply(tickets());
        assert_eq!(ids(&both), [1, 3]);

        let none = TicketFilter::new(Some("samsung"), Some(ServiceStatus::Pending)).apply(tickets());
        assert!(none.is_empty());
    }

    #[test]
    fn test_from_query() {
        let filter = TicketFilter::from_query(&ServiceRequestQuery {
            search: Some(" Apple ".into()),
            status: Some("PENDING".into()),
        })
        .unwrap();
        assert_eq!(filter, TicketFilter::new(Some("apple"), Some(ServiceStatus::Pending)));

        let empty_status = TicketFilter::from_query(&ServiceRequestQuery {
            search: None,
            status: Some(String::new()),
        })
        .unwrap();
        assert_eq!(empty_status, TicketFilter::default());

        let err = TicketFilter::from_query(&ServiceRequestQuery {
            search: None,
            status: Some("DONE".into()),
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.details.unwrap().contains_key("status"));
    }
}
