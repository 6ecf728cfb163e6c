// Create Offer Use Case

use crate::domain::{
    NotificationDraft, OfferId, OfferNotificationKind, OfferTerms, PrivateOffer,
};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, TimeProvider, TransactionalOfferStore};
use serde::{Deserialize, Serialize};
use tracing::info;

const MAX_TITLE_LEN: usize = 200;
const MAX_MESSAGE_LEN: usize = 2000;

/// Create offer request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOfferRequest {
    pub employer_id: String,
    pub seeker_id: String,
    pub terms: OfferTerms,
    /// Response deadline, epoch ms; must lie strictly after "now"
    pub deadline: i64,
}

/// Reject malformed requests before any row is written.
fn validate_request(req: &CreateOfferRequest, now_millis: i64) -> Result<()> {
    if req.employer_id.trim().is_empty() {
        return Err(AppError::Validation("employer_id must not be empty".to_string()));
    }
    if req.seeker_id.trim().is_empty() {
        return Err(AppError::Validation("seeker_id must not be empty".to_string()));
    }
    if req.employer_id == req.seeker_id {
        return Err(AppError::Validation(
            "employer and seeker must be different users".to_string(),
        ));
    }
    if req.terms.job_title.trim().is_empty() {
        return Err(AppError::Validation("job_title must not be empty".to_string()));
    }
    if req.terms.job_title.len() > MAX_TITLE_LEN {
        return Err(AppError::Validation(format!(
            "job_title too long (max {} chars)",
            MAX_TITLE_LEN
        )));
    }
    if let Some(msg) = &req.terms.personal_message {
        if msg.len() > MAX_MESSAGE_LEN {
            return Err(AppError::Validation(format!(
                "personal_message too long (max {} chars)",
                MAX_MESSAGE_LEN
            )));
        }
    }
    if req.deadline <= now_millis {
        return Err(AppError::Validation(
            "deadline must lie in the future".to_string(),
        ));
    }
    Ok(())
}

/// Execute create use case (with transaction for atomicity)
///
/// Inserts the PENDING offer and exactly one new_offer notification for the
/// seeker in a single transaction.
///
/// # Arguments
///
/// * `store` - Transactional offer store
/// * `id_provider` - ID generator (injected for determinism)
/// * `time_provider` - Time provider (injected for determinism)
/// * `req` - Create request
pub async fn execute(
    store: &dyn TransactionalOfferStore,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    req: CreateOfferRequest,
) -> Result<OfferId> {
    let now = time_provider.now_millis();
    validate_request(&req, now)?;

    let offer_id = id_provider.generate_id();
    let offer = PrivateOffer::new(
        offer_id.clone(),
        now,
        req.employer_id,
        req.seeker_id,
        req.terms,
        req.deadline,
    );

    let mut tx = store.begin_transaction().await?;
    tx.insert_offer(&offer).await?;
    tx.insert_notification(&NotificationDraft::new(
        offer.id.clone(),
        offer.seeker_id.clone(),
        OfferNotificationKind::NewOffer,
        now,
    ))
    .await?;
    tx.commit().await?;

    info!(
        offer_id = %offer.id,
        employer_id = %offer.employer_id,
        seeker_id = %offer.seeker_id,
        deadline = offer.deadline,
        "Private offer created"
    );

    Ok(offer_id)
}
