// Expiry Sweep Use Case
//
// Read paths already report EXPIRED through derived_status; this sweep
// persists the state lazily and emits the offer_expired notification. Runs
// at daemon startup and on explicit admin request - no periodic worker.

use crate::domain::{NotificationDraft, OfferNotificationKind};
use crate::error::Result;
use crate::port::{OfferRepository, TimeProvider, TransactionalOfferStore};
use tracing::info;

/// Execute the sweep; returns how many offers were expired.
pub async fn execute(
    offers: &dyn OfferRepository,
    store: &dyn TransactionalOfferStore,
    time_provider: &dyn TimeProvider,
) -> Result<u64> {
    let now = time_provider.now_millis();
    let lapsed = offers.find_lapsed(now).await?;

    let mut swept = 0u64;
    for offer in lapsed {
        let mut tx = store.begin_transaction().await?;
        // Conditional: a racing respond/sweep may have resolved it already
        if tx.mark_expired(&offer.id, now).await? {
            tx.insert_notification(&NotificationDraft::new(
                offer.id.clone(),
                offer.seeker_id.clone(),
                OfferNotificationKind::OfferExpired,
                now,
            ))
            .await?;
            tx.commit().await?;
            swept += 1;
        } else {
            tx.rollback().await?;
        }
    }

    if swept > 0 {
        info!(swept, "Expired lapsed offers");
    }

    Ok(swept)
}
