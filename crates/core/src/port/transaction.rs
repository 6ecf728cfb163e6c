// Transaction port for atomic offer + notification writes
//
// Lifecycle transitions and the notification rows they imply must land
// together: an offer without its new_offer notification (or a duplicated
// offer_viewed) would violate the exactly-once invariants.

use crate::domain::{NotificationDraft, NotificationId, OfferId, PrivateOffer};
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Transactional offer store operations
#[async_trait]
pub trait TransactionalOfferStore: Send + Sync {
    /// Begin a new transaction
    async fn begin_transaction(&self) -> Result<Box<dyn OfferStoreTransaction>>;
}

/// Offer/notification writes within a transaction
#[async_trait]
pub trait OfferStoreTransaction: Transaction {
    /// Insert offer (within transaction)
    async fn insert_offer(&mut self, offer: &PrivateOffer) -> Result<()>;

    /// Insert notification (within transaction), returning its id
    async fn insert_notification(&mut self, draft: &NotificationDraft) -> Result<NotificationId>;

    /// Conditionally flip a PENDING offer to VIEWED (within transaction)
    async fn mark_viewed(&mut self, id: &OfferId, viewed_at: i64) -> Result<bool>;

    /// Conditionally persist EXPIRED on an open, lapsed offer (within transaction)
    async fn mark_expired(&mut self, id: &OfferId, now_millis: i64) -> Result<bool>;
}
