//! Notification trigger points
//!
//! The portal only decides *when* a customer should hear about a ticket;
//! delivery (mail, SMS) belongs to whoever implements [`StatusNotifier`].

use async_trait::async_trait;
use shared::models::{ServiceRequest, StatusUpdate};

#[async_trait]
pub trait StatusNotifier: Send + Sync {
    /// A ticket was created (status PENDING)
    async fn request_created(&self, request: &ServiceRequest);

    /// A transition was committed
    async fn status_changed(&self, request: &ServiceRequest, update: &StatusUpdate);
}

/// Emits structured `notify` events instead of sending anything
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl StatusNotifier for LogNotifier {
    async fn request_created(&self, request: &ServiceRequest) {
        let [name, email] = request.requester.search_fields();
        tracing::info!(
            target: "notify",
            event = "request_created",
            service_request_id = request.id,
            tracking_code = %request.tracking_code,
            recipient = name,
            email = email,
            "Notify customer: ticket received"
        );
    }

    async fn status_changed(&self, request: &ServiceRequest, update: &StatusUpdate) {
        let [name, email] = request.requester.search_fields();
        tracing::info!(
            target: "notify",
            event = "status_changed",
            service_request_id = request.id,
            tracking_code = %request.tracking_code,
            status = %update.status,
            note = update.note.as_deref().unwrap_or(""),
            recipient = name,
            email = email,
            "Notify customer: status changed"
        );
    }
}
