//! Service request operations
//!
//! Every operation takes the caller explicitly; authorization is decided
//! here, not in the HTTP layer.

use std::sync::Arc;

use shared::ErrorCode;
use shared::models::{
    AnonymousRequestCreate, NewRequester, NewServiceRequest, RegisteredRequestCreate,
    ServiceRequest, ServiceRequestDetail, ServiceRequestQuery, ServiceStatus, StaffRequestCreate,
    StatusChange, TrackingCode, TransitionOutcome,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use super::filter::TicketFilter;
use super::notifier::{LogNotifier, StatusNotifier};
use super::state_machine;
use super::tracking_code::{ClockTrackingCodes, MAX_TRACKING_CODE_ATTEMPTS, TrackingCodeSource};
use crate::auth::{CurrentUser, Principal};
use crate::db::repository::{RepoError, account, service_request, status_update};
use crate::security_log;
use crate::utils::validation::{
    FieldErrors, MAX_ADDRESS_LEN, non_blank, validate_contact, validate_device,
    validate_optional_text,
};
use crate::utils::{AppError, AppResult};

/// Ticket lifecycle service
#[derive(Clone)]
pub struct ServiceRequestService {
    pool: SqlitePool,
    service_address: String,
    codes: Arc<dyn TrackingCodeSource>,
    notifier: Arc<dyn StatusNotifier>,
}

impl ServiceRequestService {
    pub fn new(pool: SqlitePool, service_address: impl Into<String>) -> Self {
        Self {
            pool,
            service_address: service_address.into(),
            codes: Arc::new(ClockTrackingCodes),
            notifier: Arc::new(LogNotifier),
        }
    }

    pub fn with_tracking_codes(mut self, codes: Arc<dyn TrackingCodeSource>) -> Self {
        self.codes = codes;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn StatusNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ========== Creation ==========

    /// Registered customer submission; the owner is the caller
    pub async fn submit_registered(
        &self,
        user: &CurrentUser,
        payload: RegisteredRequestCreate,
    ) -> AppResult<ServiceRequestDetail> {
        let mut errors = FieldErrors::new();
        validate_device(&payload.device, &mut errors);
        errors.record(
            "returnAddress",
            validate_optional_text(&payload.return_address, "returnAddress", MAX_ADDRESS_LEN),
        );
        errors.finish()?;

        self.ensure_account(user.id).await?;

        let draft = NewServiceRequest::registered(
            user.id,
            payload.device,
            non_blank(payload.return_address),
        );
        self.create(draft).await
    }

    /// Walk-in submission; the response carries the tracking code
    pub async fn submit_anonymous(
        &self,
        payload: AnonymousRequestCreate,
    ) -> AppResult<ServiceRequestDetail> {
        let mut errors = FieldErrors::new();
        validate_contact(&payload.contact, &mut errors);
        validate_device(&payload.device, &mut errors);
        errors.finish()?;

        let mut contact = payload.contact;
        contact.email = contact.email.trim().to_string();
        self.create(NewServiceRequest::anonymous(contact, payload.device))
            .await
    }

    /// Staff intake: either an existing account or a walk-in's contact
    pub async fn submit_intake(
        &self,
        actor: &CurrentUser,
        payload: StaffRequestCreate,
    ) -> AppResult<ServiceRequestDetail> {
        actor.require_admin("service_request.intake")?;

        let mut errors = FieldErrors::new();
        if let Some(contact) = &payload.contact {
            validate_contact(contact, &mut errors);
        }
        validate_device(&payload.device, &mut errors);
        errors.record(
            "returnAddress",
            validate_optional_text(&payload.return_address, "returnAddress", MAX_ADDRESS_LEN),
        );
        errors.finish()?;

        let contact = payload.contact.map(|mut contact| {
            contact.email = contact.email.trim().to_string();
            contact
        });
        let draft = NewServiceRequest::from_parts(
            payload.owner_id,
            contact,
            payload.device,
            non_blank(payload.return_address),
        )?;
        if let NewRequester::Account(owner_id) = draft.requester {
            self.ensure_account(owner_id).await?;
        }
        self.create(draft).await
    }

    /// Insert a PENDING ticket with its first history entry
    ///
    /// Tracking-code collisions are retried with a fresh code; after
    /// [`MAX_TRACKING_CODE_ATTEMPTS`] the call fails.
    pub async fn create(&self, draft: NewServiceRequest) -> AppResult<ServiceRequestDetail> {
        for attempt in 1..=MAX_TRACKING_CODE_ATTEMPTS {
            let code = self.codes.next_code();
            let id = snowflake_id();
            let now = now_millis();

            let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
            match service_request::insert(&mut tx, id, &code, &draft, now)
                .await
                .map_err(insert_error)
            {
                Ok(()) => {}
                Err(e) if e.code == ErrorCode::TrackingCodeConflict => {
                    tracing::warn!(attempt, tracking_code = %code, reason = %e.message, "Tracking code collision, regenerating");
                    // rollback on drop
                    continue;
                }
                Err(e) => return Err(e),
            }
            status_update::insert(&mut tx, id, ServiceStatus::Pending, None, now)
                .await?;
            tx.commit().await.map_err(RepoError::from)?;

            let detail = self.detail_by_id(id).await?;
            tracing::info!(
                service_request_id = id,
                tracking_code = %detail.request.tracking_code,
                anonymous = matches!(draft.requester, NewRequester::Guest(_)),
                "Service request created"
            );
            self.notify_created(&detail.request);
            return Ok(detail);
        }

        tracing::error!(
            attempts = MAX_TRACKING_CODE_ATTEMPTS,
            "Could not allocate a unique tracking code"
        );
        Err(AppError::new(ErrorCode::TrackingCodeExhausted))
    }

    // ========== Queries ==========

    /// Owner or admin only
    pub async fn get(&self, principal: &Principal, id: i64) -> AppResult<ServiceRequestDetail> {
        let user = principal.require_user()?;
        let detail = self.detail_by_id(id).await?;

        if !user.is_admin() && detail.request.owner_id() != Some(user.id) {
            security_log!(
                "WARN",
                "not_request_owner",
                user_id = user.id,
                service_request_id = id
            );
            return Err(AppError::new(ErrorCode::NotRequestOwner));
        }
        Ok(detail)
    }

    /// Public lookup; any bad code gets the same generic not-found
    pub async fn track(&self, raw_code: &str) -> AppResult<ServiceRequestDetail> {
        let not_found = || AppError::new(ErrorCode::TrackingCodeNotFound);

        let code = TrackingCode::parse(raw_code).map_err(|_| not_found())?;
        let request = service_request::find_by_tracking_code(&self.pool, &code)
            .await?
            .ok_or_else(not_found)?;
        self.detail(request).await
    }

    /// Own tickets for customers, all tickets for admins; filtered
    pub async fn list(
        &self,
        principal: &Principal,
        query: &ServiceRequestQuery,
    ) -> AppResult<Vec<ServiceRequest>> {
        let user = principal.require_user()?;
        let filter = TicketFilter::from_query(query)?;

        let tickets = if user.is_admin() {
            service_request::find_all(&self.pool).await?
        } else {
            service_request::find_by_owner(&self.pool, user.id).await?
        };
        Ok(filter.apply(tickets))
    }

    // ========== Mutations ==========

    /// Admin-only status change; notifies after commit
    pub async fn transition(
        &self,
        actor: &CurrentUser,
        id: i64,
        change: StatusChange,
    ) -> AppResult<TransitionOutcome> {
        let outcome =
            state_machine::transition(&self.pool, actor, id, &change.status, change.note).await?;
        self.notify_status_changed(&outcome);
        Ok(outcome)
    }

    /// Admin-only; history goes with the ticket
    pub async fn delete(&self, actor: &CurrentUser, id: i64) -> AppResult<bool> {
        actor.require_admin("service_request.delete")?;

        if !service_request::delete(&self.pool, id).await? {
            return Err(AppError::new(ErrorCode::ServiceRequestNotFound));
        }
        tracing::info!(service_request_id = id, actor_id = actor.id, "Service request deleted");
        Ok(true)
    }

    // ========== Helpers ==========

    async fn ensure_account(&self, id: i64) -> AppResult<()> {
        if account::find_by_id(&self.pool, id).await?.is_none() {
            return Err(AppError::with_message(
                ErrorCode::AccountNotFound,
                format!("Account {id} not found"),
            ));
        }
        Ok(())
    }

    async fn detail_by_id(&self, id: i64) -> AppResult<ServiceRequestDetail> {
        let request = service_request::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ServiceRequestNotFound))?;
        self.detail(request).await
    }

    async fn detail(&self, request: ServiceRequest) -> AppResult<ServiceRequestDetail> {
        let status_updates = status_update::find_by_request(&self.pool, request.id).await?;
        let logistics = request.logistics(&self.service_address);
        Ok(ServiceRequestDetail {
            request,
            status_updates,
            logistics,
        })
    }

    fn notify_created(&self, request: &ServiceRequest) {
        let notifier = Arc::clone(&self.notifier);
        let request = request.clone();
        tokio::spawn(async move {
            notifier.request_created(&request).await;
        });
    }

    fn notify_status_changed(&self, outcome: &TransitionOutcome) {
        let notifier = Arc::clone(&self.notifier);
        let outcome = outcome.clone();
        tokio::spawn(async move {
            notifier
                .status_changed(&outcome.service_request, &outcome.status_update)
                .await;
        });
    }
}

/// A unique violation on insert can only be the tracking code (ids are fresh)
fn insert_error(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(reason) => {
            AppError::with_message(ErrorCode::TrackingCodeConflict, reason)
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;
    use async_trait::async_trait;
    use shared::models::{ContactInfo, DeviceInfo, Role, StatusUpdate};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    /// Hands out a fixed sequence, then repeats the last code
    struct ScriptedCodes(Mutex<VecDeque<TrackingCode>>);

    impl ScriptedCodes {
        fn new(codes: &[TrackingCode]) -> Arc<Self> {
            Arc::new(Self(Mutex::new(codes.iter().cloned().collect())))
        }
    }

    impl TrackingCodeSource for ScriptedCodes {
        fn next_code(&self) -> TrackingCode {
            let mut queue = self.0.lock().unwrap();
            if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            }
        }
    }

    struct RecordingNotifier(mpsc::UnboundedSender<String>);

    #[async_trait]
    impl StatusNotifier for RecordingNotifier {
        async fn request_created(&self, request: &ServiceRequest) {
            let _ = self.0.send(format!("created {}", request.tracking_code));
        }

        async fn status_changed(&self, request: &ServiceRequest, update: &StatusUpdate) {
            let _ = self.0.send(format!("changed {} {}", request.id, update.status));
        }
    }

    const SHOP: &str = "Shop, Main Street 1";

    fn user(id: i64, role: Role) -> CurrentUser {
        CurrentUser {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@x.com"),
            role,
        }
    }

    fn device(brand: &str, model: &str) -> DeviceInfo {
        DeviceInfo {
            device_type: "phone".into(),
            brand: brand.into(),
            model: model.into(),
            serial_number: None,
            purchase_date: None,
            problem_category: "screen".into(),
            problem: "ekran kırık".into(),
            additional_notes: None,
        }
    }

    fn ayse() -> AnonymousRequestCreate {
        AnonymousRequestCreate {
            contact: ContactInfo {
                name: "Ayşe".into(),
                email: "a@x.com".into(),
                phone: "5551112233".into(),
                address: "Kadıköy, İstanbul".into(),
            },
            device: device("apple", "iPhone 11"),
        }
    }

    async fn service() -> ServiceRequestService {
        let pool = test_support::pool().await;
        test_support::insert_account(&pool, 1, "admin", "admin@x.com", "ADMIN", 1).await;
        test_support::insert_account(&pool, 2, "mehmet", "m@x.com", "USER", 2).await;
        test_support::insert_account(&pool, 3, "zeynep", "z@x.com", "USER", 3).await;
        ServiceRequestService::new(pool, SHOP)
    }

    #[tokio::test]
    async fn test_anonymous_submission_scenario() {
        let svc = service().await;
        let detail = svc.submit_anonymous(ayse()).await.unwrap();

        assert_eq!(detail.request.status, ServiceStatus::Pending);
        assert!(detail.request.tracking_code.as_str().starts_with("SRV-"));
        assert_eq!(detail.status_updates.len(), 1);
        assert_eq!(detail.status_updates[0].status, ServiceStatus::Pending);
        assert_eq!(detail.status_updates[0].note, None);
        assert_eq!(detail.logistics.service_address, None);

        // lower-case lookup finds the same ticket
        let code = detail.request.tracking_code.as_str().to_ascii_lowercase();
        let tracked = svc.track(&code).await.unwrap();
        assert_eq!(tracked.request.id, detail.request.id);
    }

    #[tokio::test]
    async fn test_track_unknown_or_malformed_is_generic_not_found() {
        let svc = service().await;
        for raw in ["SRV-000000-0000", "garbage", ""] {
            let err = svc.track(raw).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::TrackingCodeNotFound, "{raw}");
            assert!(err.details.is_none());
        }
    }

    #[tokio::test]
    async fn test_tracking_code_collision_is_retried() {
        let taken = TrackingCode::from_parts(111_111, 1);
        let fresh = TrackingCode::from_parts(222_222, 2);
        let base = service().await;

        let first = base
            .clone()
            .with_tracking_codes(ScriptedCodes::new(&[taken.clone()]))
            .submit_anonymous(ayse())
            .await
            .unwrap();
        assert_eq!(first.request.tracking_code, taken);

        let second = base
            .with_tracking_codes(ScriptedCodes::new(&[taken.clone(), taken, fresh.clone()]))
            .submit_anonymous(ayse())
            .await
            .unwrap();
        assert_eq!(second.request.tracking_code, fresh);
    }

    #[tokio::test]
    async fn test_tracking_code_exhaustion_is_internal_error() {
        let taken = TrackingCode::from_parts(111_111, 1);
        let svc = service()
            .await
            .with_tracking_codes(ScriptedCodes::new(&[taken]));
        svc.submit_anonymous(ayse()).await.unwrap();

        let err = svc.submit_anonymous(ayse()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TrackingCodeExhausted);
        assert_eq!(err.http_status(), http::StatusCode::INTERNAL_SERVER_ERROR);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM service_request")
            .fetch_one(svc.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_many_codes_insert_without_surfacing_conflicts() {
        let svc = service().await;
        for _ in 0..50 {
            svc.submit_anonymous(ayse()).await.unwrap();
        }
        let list = svc
            .list(&Principal::from(user(1, Role::Admin)), &ServiceRequestQuery::default())
            .await
            .unwrap();
        assert_eq!(list.len(), 50);
    }

    #[tokio::test]
    async fn test_registered_submission_and_access() {
        let svc = service().await;
        let owner = user(2, Role::User);
        let detail = svc
            .submit_registered(
                &owner,
                RegisteredRequestCreate {
                    device: device("samsung", "S21"),
                    return_address: Some("  Beşiktaş ".into()),
                },
            )
            .await
            .unwrap();
        let id = detail.request.id;
        assert_eq!(detail.request.owner_id(), Some(2));
        assert_eq!(detail.request.return_address.as_deref(), Some("Beşiktaş"));

        // owner and admin may read
        svc.get(&Principal::from(owner), id).await.unwrap();
        svc.get(&Principal::from(user(1, Role::Admin)), id).await.unwrap();

        // other customer and guest may not
        let other = svc.get(&Principal::from(user(3, Role::User)), id).await.unwrap_err();
        assert_eq!(other.code, ErrorCode::NotRequestOwner);
        let guest = svc.get(&Principal::Anonymous, id).await.unwrap_err();
        assert_eq!(guest.code, ErrorCode::NotAuthenticated);

        let missing = svc.get(&Principal::from(user(1, Role::Admin)), 404).await.unwrap_err();
        assert_eq!(missing.code, ErrorCode::ServiceRequestNotFound);
    }

    #[tokio::test]
    async fn test_registered_submission_requires_existing_account() {
        let svc = service().await;
        let err = svc
            .submit_registered(
                &user(99, Role::User),
                RegisteredRequestCreate {
                    device: device("samsung", "S21"),
                    return_address: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountNotFound);
    }

    #[tokio::test]
    async fn test_submission_validation_details() {
        let svc = service().await;
        let mut payload = ayse();
        payload.contact.email = "not-an-email".into();
        payload.device.model = " ".into();

        let err = svc.submit_anonymous(payload).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert!(details.contains_key("email"));
        assert!(details.contains_key("model"));
    }

    #[tokio::test]
    async fn test_list_scopes_by_role_and_filters() {
        let svc = service().await;
        svc.submit_anonymous(ayse()).await.unwrap();
        svc.submit_registered(
            &user(2, Role::User),
            RegisteredRequestCreate {
                device: device("samsung", "S21"),
                return_address: None,
            },
        )
        .await
        .unwrap();

        let own = svc
            .list(&Principal::from(user(2, Role::User)), &ServiceRequestQuery::default())
            .await
            .unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].owner_id(), Some(2));

        let admin = Principal::from(user(1, Role::Admin));
        let by_contact_email = svc
            .list(
                &admin,
                &ServiceRequestQuery {
                    search: Some("A@X.COM".into()),
                    status: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(by_contact_email.len(), 1);
        assert_eq!(by_contact_email[0].requester.display_name(), "Ayşe");

        let guest = svc
            .list(&Principal::Anonymous, &ServiceRequestQuery::default())
            .await
            .unwrap_err();
        assert_eq!(guest.code, ErrorCode::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_approval_scenario_exposes_service_address() {
        let svc = service().await;
        let created = svc.submit_anonymous(ayse()).await.unwrap();
        let id = created.request.id;

        let outcome = svc
            .transition(
                &user(1, Role::Admin),
                id,
                StatusChange {
                    status: "APPROVED".into(),
                    note: Some("Kargo onaylandı".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome.service_request.status, ServiceStatus::Approved);

        let detail = svc.track(created.request.tracking_code.as_str()).await.unwrap();
        assert_eq!(detail.status_updates.len(), 2);
        assert_eq!(detail.status_updates[0].status, ServiceStatus::Approved);
        assert_eq!(detail.status_updates[0].note.as_deref(), Some("Kargo onaylandı"));
        assert_eq!(detail.status_updates[1].status, ServiceStatus::Pending);
        assert_eq!(detail.logistics.service_address.as_deref(), Some(SHOP));
        assert_eq!(detail.request.status, detail.status_updates[0].status);

        svc.transition(
            &user(1, Role::Admin),
            id,
            StatusChange {
                status: "COMPLETED".into(),
                note: None,
            },
        )
        .await
        .unwrap();
        let completed = svc.track(created.request.tracking_code.as_str()).await.unwrap();
        assert_eq!(completed.logistics.service_address, None);
        assert_eq!(
            completed.logistics.customer_address.as_deref(),
            Some("Kadıköy, İstanbul")
        );
    }

    #[tokio::test]
    async fn test_customer_cannot_transition_or_delete() {
        let svc = service().await;
        let id = svc.submit_anonymous(ayse()).await.unwrap().request.id;
        let customer = user(2, Role::User);

        let err = svc
            .transition(
                &customer,
                id,
                StatusChange {
                    status: "APPROVED".into(),
                    note: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminRequired);

        let err = svc.delete(&customer, id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminRequired);
    }

    #[tokio::test]
    async fn test_admin_delete_cascades() {
        let svc = service().await;
        let created = svc.submit_anonymous(ayse()).await.unwrap();
        let admin = user(1, Role::Admin);

        assert!(svc.delete(&admin, created.request.id).await.unwrap());
        let err = svc.track(created.request.tracking_code.as_str()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TrackingCodeNotFound);

        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM status_update")
            .fetch_one(svc.pool())
            .await
            .unwrap();
        assert_eq!(orphans, 0);

        let again = svc.delete(&admin, created.request.id).await.unwrap_err();
        assert_eq!(again.code, ErrorCode::ServiceRequestNotFound);
    }

    #[tokio::test]
    async fn test_notifier_fires_after_commit() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let svc = service()
            .await
            .with_notifier(Arc::new(RecordingNotifier(tx)));

        let created = svc.submit_anonymous(ayse()).await.unwrap();
        let event = tokio::time::timeout(std::time::Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event, format!("created {}", created.request.tracking_code));

        svc.transition(
            &user(1, Role::Admin),
            created.request.id,
            StatusChange {
                status: "REJECTED".into(),
                note: None,
            },
        )
        .await
        .unwrap();
        let event = tokio::time::timeout(std::time::Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event, format!("changed {} REJECTED", created.request.id));
    }

    fn intake(owner_id: Option<i64>, with_contact: bool) -> StaffRequestCreate {
        StaffRequestCreate {
            owner_id,
            contact: with_contact.then(|| ayse().contact),
            device: device("xiaomi", "Redmi 9"),
            return_address: None,
        }
    }

    #[tokio::test]
    async fn test_staff_intake_for_account_or_walk_in() {
        let svc = service().await;
        let admin = user(1, Role::Admin);

        let owned = svc.submit_intake(&admin, intake(Some(2), false)).await.unwrap();
        assert_eq!(owned.request.owner_id(), Some(2));
        assert_eq!(owned.status_updates.len(), 1);

        let walk_in = svc.submit_intake(&admin, intake(None, true)).await.unwrap();
        assert_eq!(walk_in.request.owner_id(), None);
        assert_eq!(walk_in.request.requester.display_name(), "Ayşe");
    }

    #[tokio::test]
    async fn test_staff_intake_rejects_ambiguous_requester() {
        let svc = service().await;
        let admin = user(1, Role::Admin);

        for payload in [intake(Some(2), true), intake(None, false)] {
            let err = svc.submit_intake(&admin, payload).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::AmbiguousRequester);
            assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM service_request")
            .fetch_one(svc.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_staff_intake_checks_role_and_owner() {
        let svc = service().await;

        let err = svc
            .submit_intake(&user(2, Role::User), intake(None, true))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminRequired);

        let err = svc
            .submit_intake(&user(1, Role::Admin), intake(Some(99), false))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountNotFound);
    }

    #[test]
    fn test_unique_violation_on_insert_is_tracking_conflict() {
        let err = insert_error(RepoError::Duplicate("UNIQUE constraint failed".into()));
        assert_eq!(err.code, ErrorCode::TrackingCodeConflict);
        assert_eq!(err.http_status(), http::StatusCode::CONFLICT);

        let err = insert_error(RepoError::Database("disk I/O error".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
