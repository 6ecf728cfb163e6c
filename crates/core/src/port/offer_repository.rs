// Offer Repository Port (Interface)

use crate::domain::{OfferId, OfferStatus, PrivateOffer, UserId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for PrivateOffer persistence
///
/// Every mutation is a conditional single-row update scoped by the expected
/// prior state; a guard that no longer matches returns false instead of
/// silently applying, which doubles as the optimistic concurrency check.
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Insert a new offer
    async fn insert(&self, offer: &PrivateOffer) -> Result<()>;

    /// Find offer by ID
    async fn find_by_id(&self, id: &OfferId) -> Result<Option<PrivateOffer>>;

    /// Offers addressed to one seeker, newest first
    async fn find_for_seeker(&self, seeker_id: &UserId) -> Result<Vec<PrivateOffer>>;

    /// Offers sent by one employer, newest first
    async fn find_for_employer(&self, employer_id: &UserId) -> Result<Vec<PrivateOffer>>;

    /// Flip a PENDING offer to VIEWED. Returns false when the offer was no
    /// longer PENDING (repeat view or lost race).
    async fn mark_viewed(&self, id: &OfferId, viewed_at: i64) -> Result<bool>;

    /// Record the seeker's decision on an offer that is still PENDING or
    /// VIEWED with its deadline ahead of `responded_at`. Returns false when
    /// the guard no longer matches.
    async fn record_response(
        &self,
        id: &OfferId,
        status: OfferStatus,
        responded_at: i64,
        message: &str,
    ) -> Result<bool>;

    /// PENDING/VIEWED offers whose deadline lies before `now_millis`
    async fn find_lapsed(&self, now_millis: i64) -> Result<Vec<PrivateOffer>>;

    /// Count offers by persisted status
    async fn count_by_status(&self, status: OfferStatus) -> Result<i64>;
}
