//! Service request lifecycle
//!
//! - **state_machine**: status transitions (ticket row plus history entry in one transaction)
//! - **tracking_code**: public tracking code generation
//! - **filter**: admin list search and status filter
//! - **notifier**: hook fired after a ticket is created or changes status
//! - **service**: [`ServiceRequestService`], the entry point the handlers call

pub mod filter;
pub mod notifier;
pub mod service;
pub mod state_machine;
pub mod tracking_code;

pub use filter::TicketFilter;
pub use notifier::{LogNotifier, StatusNotifier};
pub use service::ServiceRequestService;
pub use tracking_code::{ClockTrackingCodes, MAX_TRACKING_CODE_ATTEMPTS, TrackingCodeSource};
