// Offer Service - Core use cases for the private offer lifecycle

pub mod create;
pub mod expire;
pub mod respond;
pub mod view;

pub use create::CreateOfferRequest;
pub use respond::RespondRequest;
pub use view::ViewOfferRequest;

use crate::domain::{OfferId, OfferStatus, PrivateOffer, UserId};
use crate::error::{AppError, Result};
use crate::port::{
    IdProvider, OfferRepository, TimeProvider, TransactionalOfferStore,
};
use std::sync::Arc;

/// Offer Service
///
/// Facade over the lifecycle use cases with the ports wired in once.
pub struct OfferService {
    offers: Arc<dyn OfferRepository>,
    store: Arc<dyn TransactionalOfferStore>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl OfferService {
    pub fn new(
        offers: Arc<dyn OfferRepository>,
        store: Arc<dyn TransactionalOfferStore>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            offers,
            store,
            id_provider,
            time_provider,
        }
    }

    /// Create a new offer and its new_offer notification
    pub async fn create(&self, req: CreateOfferRequest) -> Result<OfferId> {
        create::execute(
            self.store.as_ref(),
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            req,
        )
        .await
    }

    /// Record that the seeker viewed the offer
    pub async fn view(&self, req: ViewOfferRequest) -> Result<OfferStatus> {
        view::execute(
            self.offers.as_ref(),
            self.store.as_ref(),
            self.time_provider.as_ref(),
            req,
        )
        .await
    }

    /// Record the seeker's decision
    pub async fn respond(&self, req: RespondRequest) -> Result<PrivateOffer> {
        respond::execute(self.offers.as_ref(), self.time_provider.as_ref(), req).await
    }

    /// Persist EXPIRED on lapsed offers and emit their notifications
    pub async fn sweep_expired(&self) -> Result<u64> {
        expire::execute(
            self.offers.as_ref(),
            self.store.as_ref(),
            self.time_provider.as_ref(),
        )
        .await
    }

    /// One offer with its derived status applied, scoped to either party
    pub async fn get(&self, offer_id: &OfferId, acting_user: &UserId) -> Result<PrivateOffer> {
        let offer = self
            .offers
            .find_by_id(offer_id)
            .await?
            .filter(|o| o.seeker_id == *acting_user || o.employer_id == *acting_user)
            .ok_or_else(|| AppError::NotFound(format!("Offer {} not found", offer_id)))?;
        Ok(Self::with_derived_status(
            offer,
            self.time_provider.now_millis(),
        ))
    }

    /// Offers addressed to the seeker, newest first, derived statuses applied
    pub async fn list_for_seeker(&self, seeker_id: &UserId) -> Result<Vec<PrivateOffer>> {
        let now = self.time_provider.now_millis();
        let offers = self.offers.find_for_seeker(seeker_id).await?;
        Ok(offers
            .into_iter()
            .map(|o| Self::with_derived_status(o, now))
            .collect())
    }

    /// Offers sent by the employer, newest first, derived statuses applied
    pub async fn list_for_employer(&self, employer_id: &UserId) -> Result<Vec<PrivateOffer>> {
        let now = self.time_provider.now_millis();
        let offers = self.offers.find_for_employer(employer_id).await?;
        Ok(offers
            .into_iter()
            .map(|o| Self::with_derived_status(o, now))
            .collect())
    }

    // Read paths report the derived status, not the raw persisted one.
    fn with_derived_status(mut offer: PrivateOffer, now: i64) -> PrivateOffer {
        offer.status = offer.derived_status(now);
        offer
    }
}
