// Respond to Offer Use Case

use crate::domain::{DomainError, OfferDecision, PrivateOffer};
use crate::error::{AppError, Result};
use crate::port::{OfferRepository, TimeProvider};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Respond request; `decision` arrives as a wire string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondRequest {
    pub offer_id: String,
    pub acting_user: String,
    pub decision: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Execute respond use case.
///
/// Parses and validates the decision before any mutation, applies the
/// domain guard (terminal and deadline checks, typed InvalidTransition),
/// then persists through the conditional update. Zero rows affected means
/// a concurrent request resolved the offer first; that race is re-read and
/// reported as InvalidTransition, never silently repeated.
pub async fn execute(
    offers: &dyn OfferRepository,
    time_provider: &dyn TimeProvider,
    req: RespondRequest,
) -> Result<PrivateOffer> {
    let decision = OfferDecision::parse(&req.decision).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown decision '{}' (expected 'accepted' or 'rejected')",
            req.decision
        ))
    })?;

    let now = time_provider.now_millis();

    let mut offer = offers
        .find_by_id(&req.offer_id)
        .await?
        .filter(|o| o.seeker_id == req.acting_user)
        .ok_or_else(|| AppError::NotFound(format!("Offer {} not found", req.offer_id)))?;

    let message = req.message.unwrap_or_default();
    offer.respond(decision, message.clone(), now)?;

    let updated = offers
        .record_response(&offer.id, offer.status, now, &message)
        .await?;
    if !updated {
        let from = match offers.find_by_id(&offer.id).await? {
            Some(current) => current.derived_status(now).to_string(),
            None => "UNKNOWN".to_string(),
        };
        return Err(DomainError::InvalidTransition {
            from,
            to: offer.status.to_string(),
        }
        .into());
    }

    info!(
        offer_id = %offer.id,
        seeker_id = %offer.seeker_id,
        decision = %decision,
        "Offer resolved"
    );

    Ok(offer)
}
