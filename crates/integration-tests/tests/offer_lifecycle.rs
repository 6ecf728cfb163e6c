//! Offer Lifecycle Integration Tests
//!
//! End-to-end: core services over the SQLite adapter, fixed test clock.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use joblink_core::application::offers::{CreateOfferRequest, RespondRequest, ViewOfferRequest};
use joblink_core::application::notifications::FeedRequest;
use joblink_core::application::{NotificationService, OfferService};
use joblink_core::domain::{
    OfferNotificationKind, OfferStatus, OfferTerms, FULL_FEED_LIMIT,
};
use joblink_core::error::AppError;
use joblink_core::port::id_provider::UuidProvider;
use joblink_core::port::{
    NotificationRepository, OfferRepository, PathLinkBuilder, TimeProvider,
};
use joblink_infra_sqlite::{
    create_pool, run_migrations, SqliteActivityRepository, SqliteNotificationRepository,
    SqliteOfferRepository,
};

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;
const T0: i64 = 1_700_000_000_000;

/// Settable clock shared by services and assertions
struct TestClock(AtomicI64);

impl TestClock {
    fn at(millis: i64) -> Arc<Self> {
        Arc::new(Self(AtomicI64::new(millis)))
    }

    fn set(&self, millis: i64) {
        self.0.store(millis, Ordering::SeqCst);
    }
}

impl TimeProvider for TestClock {
    fn now_millis(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

struct Harness {
    clock: Arc<TestClock>,
    offers: Arc<SqliteOfferRepository>,
    notifications: Arc<SqliteNotificationRepository>,
    offer_service: OfferService,
    notification_service: NotificationService,
}

async fn setup() -> Harness {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let clock = TestClock::at(T0);
    let offers = Arc::new(SqliteOfferRepository::new(pool.clone()));
    let notifications = Arc::new(SqliteNotificationRepository::new(pool.clone()));
    let activity = Arc::new(SqliteActivityRepository::new(pool));

    let offer_service = OfferService::new(
        offers.clone(),
        offers.clone(),
        Arc::new(UuidProvider),
        clock.clone(),
    );

    let notification_service = NotificationService::new(
        notifications.clone(),
        activity.clone(),
        activity.clone(),
        activity,
        clock.clone(),
        Arc::new(PathLinkBuilder::default()),
    );

    Harness {
        clock,
        offers,
        notifications,
        offer_service,
        notification_service,
    }
}

fn create_request(employer: &str, seeker: &str, deadline: i64) -> CreateOfferRequest {
    CreateOfferRequest {
        employer_id: employer.to_string(),
        seeker_id: seeker.to_string(),
        terms: OfferTerms {
            job_title: "Product Designer".to_string(),
            city: "Ikeja".to_string(),
            state: "Lagos".to_string(),
            ..OfferTerms::default()
        },
        deadline,
    }
}

#[tokio::test]
async fn create_starts_pending_and_notifies_seeker() {
    let h = setup().await;

    let offer_id = h
        .offer_service
        .create(create_request("employer-1", "seeker-1", T0 + 5 * DAY_MS))
        .await
        .unwrap();

    let offer = h.offer_service.get(&offer_id, &"seeker-1".to_string()).await.unwrap();
    assert_eq!(offer.status, OfferStatus::Pending);
    assert_eq!(offer.created_at, T0);
    assert!(offer.viewed_at.is_none());

    // Exactly one new_offer notification, addressed to the seeker, unread
    let inbox = h
        .notifications
        .find_for_user(&"seeker-1".to_string())
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, OfferNotificationKind::NewOffer);
    assert_eq!(inbox[0].offer_id, offer_id);
    assert!(!inbox[0].is_read);
}

#[tokio::test]
async fn create_validation_rejects_before_writing() {
    let h = setup().await;

    // Deadline in the past
    let err = h
        .offer_service
        .create(create_request("employer-1", "seeker-1", T0 - 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let inbox = h
        .notifications
        .find_for_user(&"seeker-1".to_string())
        .await
        .unwrap();
    assert!(inbox.is_empty());
}

#[tokio::test]
async fn view_notifies_employer_exactly_once() {
    let h = setup().await;

    let offer_id = h
        .offer_service
        .create(create_request("employer-1", "seeker-1", T0 + 5 * DAY_MS))
        .await
        .unwrap();

    // Seeker views one hour in
    h.clock.set(T0 + HOUR_MS);
    let status = h
        .offer_service
        .view(ViewOfferRequest {
            offer_id: offer_id.clone(),
            acting_user: "seeker-1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(status, OfferStatus::Viewed);

    let offer = h.offer_service.get(&offer_id, &"seeker-1".to_string()).await.unwrap();
    assert_eq!(offer.viewed_at, Some(T0 + HOUR_MS));

    // Employer got exactly one offer_viewed; their unread count rose by exactly 1
    let employer_inbox = h
        .notifications
        .find_for_user(&"employer-1".to_string())
        .await
        .unwrap();
    assert_eq!(employer_inbox.len(), 1);
    assert_eq!(employer_inbox[0].kind, OfferNotificationKind::OfferViewed);

    let feed = h
        .notification_service
        .feed(FeedRequest::new("employer-1", FULL_FEED_LIMIT))
        .await
        .unwrap();
    assert_eq!(feed.unread_count, 1);

    // Repeat view: no-op, no duplicate, viewed_at unchanged
    h.clock.set(T0 + 2 * HOUR_MS);
    let status = h
        .offer_service
        .view(ViewOfferRequest {
            offer_id: offer_id.clone(),
            acting_user: "seeker-1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(status, OfferStatus::Viewed);

    let offer = h.offer_service.get(&offer_id, &"seeker-1".to_string()).await.unwrap();
    assert_eq!(offer.viewed_at, Some(T0 + HOUR_MS));

    let employer_inbox = h
        .notifications
        .find_for_user(&"employer-1".to_string())
        .await
        .unwrap();
    assert_eq!(employer_inbox.len(), 1);
}

#[tokio::test]
async fn view_by_other_user_is_a_silent_noop() {
    let h = setup().await;

    let offer_id = h
        .offer_service
        .create(create_request("employer-1", "seeker-1", T0 + 5 * DAY_MS))
        .await
        .unwrap();

    let status = h
        .offer_service
        .view(ViewOfferRequest {
            offer_id: offer_id.clone(),
            acting_user: "someone-else".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(status, OfferStatus::Pending);

    let offer = h.offer_service.get(&offer_id, &"seeker-1".to_string()).await.unwrap();
    assert_eq!(offer.status, OfferStatus::Pending);
    assert!(offer.viewed_at.is_none());

    let employer_inbox = h
        .notifications
        .find_for_user(&"employer-1".to_string())
        .await
        .unwrap();
    assert!(employer_inbox.is_empty());
}

#[tokio::test]
async fn respond_records_decision_once() {
    let h = setup().await;

    let offer_id = h
        .offer_service
        .create(create_request("employer-1", "seeker-1", T0 + 5 * DAY_MS))
        .await
        .unwrap();

    h.clock.set(T0 + HOUR_MS);
    h.offer_service
        .view(ViewOfferRequest {
            offer_id: offer_id.clone(),
            acting_user: "seeker-1".to_string(),
        })
        .await
        .unwrap();

    h.clock.set(T0 + 2 * HOUR_MS);
    let offer = h
        .offer_service
        .respond(RespondRequest {
            offer_id: offer_id.clone(),
            acting_user: "seeker-1".to_string(),
            decision: "accepted".to_string(),
            message: Some("Thanks, I accept".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(offer.status, OfferStatus::Accepted);
    assert_eq!(offer.responded_at, Some(T0 + 2 * HOUR_MS));
    assert_eq!(offer.response_message.as_deref(), Some("Thanks, I accept"));

    // Second respond with the opposite decision is a definitive error
    let err = h
        .offer_service
        .respond(RespondRequest {
            offer_id: offer_id.clone(),
            acting_user: "seeker-1".to_string(),
            decision: "rejected".to_string(),
            message: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(_)));
    assert!(err.to_string().contains("ACCEPTED"));

    // First result untouched
    let offer = h.offer_service.get(&offer_id, &"seeker-1".to_string()).await.unwrap();
    assert_eq!(offer.status, OfferStatus::Accepted);
    assert_eq!(offer.response_message.as_deref(), Some("Thanks, I accept"));
}

#[tokio::test]
async fn respond_rejects_malformed_decision_before_mutation() {
    let h = setup().await;

    let offer_id = h
        .offer_service
        .create(create_request("employer-1", "seeker-1", T0 + 5 * DAY_MS))
        .await
        .unwrap();

    let err = h
        .offer_service
        .respond(RespondRequest {
            offer_id: offer_id.clone(),
            acting_user: "seeker-1".to_string(),
            decision: "maybe".to_string(),
            message: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let offer = h.offer_service.get(&offer_id, &"seeker-1".to_string()).await.unwrap();
    assert_eq!(offer.status, OfferStatus::Pending);
}

#[tokio::test]
async fn respond_on_unknown_or_foreign_offer_is_not_found() {
    let h = setup().await;

    let offer_id = h
        .offer_service
        .create(create_request("employer-1", "seeker-1", T0 + 5 * DAY_MS))
        .await
        .unwrap();

    // Unknown id
    let err = h
        .offer_service
        .respond(RespondRequest {
            offer_id: "no-such-offer".to_string(),
            acting_user: "seeker-1".to_string(),
            decision: "accepted".to_string(),
            message: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Someone else's offer reads as not-found too
    let err = h
        .offer_service
        .respond(RespondRequest {
            offer_id,
            acting_user: "seeker-2".to_string(),
            decision: "accepted".to_string(),
            message: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn racing_respond_loses_against_persisted_guard() {
    let h = setup().await;

    let offer_id = h
        .offer_service
        .create(create_request("employer-1", "seeker-1", T0 + 5 * DAY_MS))
        .await
        .unwrap();

    // Simulate a concurrent winner by resolving the row directly
    assert!(h
        .offers
        .record_response(&offer_id, OfferStatus::Rejected, T0 + HOUR_MS, "")
        .await
        .unwrap());

    // The in-flight respond had fetched a PENDING offer; its update must lose
    let err = h
        .offer_service
        .respond(RespondRequest {
            offer_id: offer_id.clone(),
            acting_user: "seeker-1".to_string(),
            decision: "accepted".to_string(),
            message: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(_)));

    let offer = h.offer_service.get(&offer_id, &"seeker-1".to_string()).await.unwrap();
    assert_eq!(offer.status, OfferStatus::Rejected);
}
