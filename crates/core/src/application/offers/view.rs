// View Offer Use Case

use crate::domain::{NotificationDraft, OfferNotificationKind, OfferStatus};
use crate::error::{AppError, Result};
use crate::port::{OfferRepository, TimeProvider, TransactionalOfferStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// View offer request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewOfferRequest {
    pub offer_id: String,
    pub acting_user: String,
}

/// Execute view use case.
///
/// First view by the designated seeker flips PENDING to VIEWED and emits
/// exactly one offer_viewed notification to the employer, atomically. The
/// conditional update guards against a concurrent racer duplicating the
/// notification. Every other case is a documented no-op:
/// - persisted state other than PENDING (repeat view, already responded),
/// - acting user other than the seeker (authorization happens upstream).
///
/// Returns the derived status after the call.
pub async fn execute(
    offers: &dyn OfferRepository,
    store: &dyn TransactionalOfferStore,
    time_provider: &dyn TimeProvider,
    req: ViewOfferRequest,
) -> Result<OfferStatus> {
    let now = time_provider.now_millis();

    let offer = offers
        .find_by_id(&req.offer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Offer {} not found", req.offer_id)))?;

    if offer.seeker_id != req.acting_user || offer.status != OfferStatus::Pending {
        return Ok(offer.derived_status(now));
    }

    let mut tx = store.begin_transaction().await?;
    let flipped = tx.mark_viewed(&offer.id, now).await?;
    if !flipped {
        // Lost the race; the winning request owns the notification.
        tx.rollback().await?;
        let current = offers
            .find_by_id(&offer.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Offer {} not found", offer.id)))?;
        return Ok(current.derived_status(now));
    }

    tx.insert_notification(&NotificationDraft::new(
        offer.id.clone(),
        offer.employer_id.clone(),
        OfferNotificationKind::OfferViewed,
        now,
    ))
    .await?;
    tx.commit().await?;

    debug!(offer_id = %offer.id, seeker_id = %offer.seeker_id, "Offer viewed");

    let mut offer = offer;
    offer.view(now);
    Ok(offer.derived_status(now))
}
