//! Offer Expiry Integration Tests
//!
//! Derived EXPIRED at read time, lazy persistence via the sweep, and the
//! deadline guard on respond.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use joblink_core::application::offers::{CreateOfferRequest, RespondRequest, ViewOfferRequest};
use joblink_core::application::OfferService;
use joblink_core::domain::{OfferNotificationKind, OfferStatus, OfferTerms};
use joblink_core::error::AppError;
use joblink_core::port::id_provider::UuidProvider;
use joblink_core::port::{NotificationRepository, TimeProvider};
use joblink_infra_sqlite::{
    create_pool, run_migrations, SqliteNotificationRepository, SqliteOfferRepository,
};
use sqlx::SqlitePool;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const T0: i64 = 1_700_000_000_000;

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

async fn setup() -> (
    SqlitePool,
    Arc<TestClock>,
    Arc<SqliteNotificationRepository>,
    OfferService,
) {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let clock = TestClock::at(T0);
    let offers = Arc::new(SqliteOfferRepository::new(pool.clone()));
    let notifications = Arc::new(SqliteNotificationRepository::new(pool.clone()));

    let service = OfferService::new(
        offers.clone(),
        offers,
        Arc::new(UuidProvider),
        clock.clone(),
    );

    (pool, clock, notifications, service)
}

async fn persisted_status(pool: &SqlitePool, offer_id: &str) -> String {
    sqlx::query_scalar("SELECT status FROM offers WHERE id = ?")
        .bind(offer_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

fn two_day_offer() -> CreateOfferRequest {
    CreateOfferRequest {
        employer_id: "employer-1".to_string(),
        seeker_id: "seeker-1".to_string(),
        terms: OfferTerms {
            job_title: "Data Analyst".to_string(),
            city: "Abuja".to_string(),
            state: "FCT".to_string(),
            ..OfferTerms::default()
        },
        deadline: T0 + 2 * DAY_MS,
    }
}

#[tokio::test]
async fn derived_status_expires_while_persisted_stays_pending() {
    let (pool, clock, _notifications, service) = setup().await;

    let offer_id = service.create(two_day_offer()).await.unwrap();

    // One day in: still pending everywhere
    clock.set(T0 + DAY_MS);
    let offer = service.get(&offer_id, &"seeker-1".to_string()).await.unwrap();
    assert_eq!(offer.status, OfferStatus::Pending);

    // Three days in: reads derive EXPIRED, the row still says PENDING
    clock.set(T0 + 3 * DAY_MS);
    let offer = service.get(&offer_id, &"seeker-1".to_string()).await.unwrap();
    assert_eq!(offer.status, OfferStatus::Expired);
    assert_eq!(persisted_status(&pool, &offer_id).await, "PENDING");

    let listed = service.list_for_seeker(&"seeker-1".to_string()).await.unwrap();
    assert_eq!(listed[0].status, OfferStatus::Expired);
}

#[tokio::test]
async fn respond_past_deadline_is_invalid_transition() {
    let (pool, clock, _notifications, service) = setup().await;

    let offer_id = service.create(two_day_offer()).await.unwrap();

    clock.set(T0 + 3 * DAY_MS);
    let err = service
        .respond(RespondRequest {
            offer_id: offer_id.clone(),
            acting_user: "seeker-1".to_string(),
            decision: "accepted".to_string(),
            message: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Domain(_)));
    assert!(err.to_string().contains("EXPIRED"));

    // Nothing was written
    assert_eq!(persisted_status(&pool, &offer_id).await, "PENDING");
}

#[tokio::test]
async fn view_past_deadline_still_reports_expired() {
    let (_pool, clock, notifications, service) = setup().await;

    let offer_id = service.create(two_day_offer()).await.unwrap();

    // The literal guard is on the persisted PENDING state, so the view
    // lands and the employer is notified, but every read stays EXPIRED
    clock.set(T0 + 3 * DAY_MS);
    let status = service
        .view(ViewOfferRequest {
            offer_id: offer_id.clone(),
            acting_user: "seeker-1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(status, OfferStatus::Expired);

    let offer = service.get(&offer_id, &"seeker-1".to_string()).await.unwrap();
    assert_eq!(offer.status, OfferStatus::Expired);
    assert!(offer.viewed_at.is_some());

    let employer_inbox = notifications
        .find_for_user(&"employer-1".to_string())
        .await
        .unwrap();
    assert_eq!(employer_inbox.len(), 1);
    assert_eq!(employer_inbox[0].kind, OfferNotificationKind::OfferViewed);
}

#[tokio::test]
async fn sweep_persists_expired_and_notifies_seeker_once() {
    let (pool, clock, notifications, service) = setup().await;

    let offer_id = service.create(two_day_offer()).await.unwrap();

    // Nothing to sweep before the deadline
    clock.set(T0 + DAY_MS);
    assert_eq!(service.sweep_expired().await.unwrap(), 0);

    clock.set(T0 + 3 * DAY_MS);
    assert_eq!(service.sweep_expired().await.unwrap(), 1);
    assert_eq!(persisted_status(&pool, &offer_id).await, "EXPIRED");

    // Seeker got the expiry notice on top of the original new_offer
    let inbox = notifications
        .find_for_user(&"seeker-1".to_string())
        .await
        .unwrap();
    let kinds: Vec<OfferNotificationKind> = inbox.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            OfferNotificationKind::OfferExpired,
            OfferNotificationKind::NewOffer
        ]
    );

    // Sweeping again finds nothing and duplicates nothing
    assert_eq!(service.sweep_expired().await.unwrap(), 0);
    let inbox = notifications
        .find_for_user(&"seeker-1".to_string())
        .await
        .unwrap();
    assert_eq!(inbox.len(), 2);
}

#[tokio::test]
async fn terminal_offers_never_expire() {
    let (_pool, clock, _notifications, service) = setup().await;

    let offer_id = service.create(two_day_offer()).await.unwrap();

    clock.set(T0 + DAY_MS);
    service
        .respond(RespondRequest {
            offer_id: offer_id.clone(),
            acting_user: "seeker-1".to_string(),
            decision: "accepted".to_string(),
            message: Some("See you Monday".to_string()),
        })
        .await
        .unwrap();

    // Far past the deadline: accepted stays accepted, the sweep skips it
    clock.set(T0 + 30 * DAY_MS);
    assert_eq!(service.sweep_expired().await.unwrap(), 0);

    let offer = service.get(&offer_id, &"seeker-1".to_string()).await.unwrap();
    assert_eq!(offer.status, OfferStatus::Accepted);
}
