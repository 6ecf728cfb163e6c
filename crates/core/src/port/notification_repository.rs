// Notification Repository Port (Interface)

use crate::domain::{NotificationDraft, NotificationId, OfferNotification, UserId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for stored offer notifications
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert a notification, returning its assigned id
    async fn insert(&self, draft: &NotificationDraft) -> Result<NotificationId>;

    /// All notifications addressed to one user, newest first
    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<OfferNotification>>;

    /// Mark one notification read, scoped by recipient. Returns false when
    /// no row matched (unknown id or not the caller's notification).
    /// Idempotent on already-read rows.
    async fn mark_read(&self, id: NotificationId, user_id: &UserId) -> Result<bool>;

    /// Mark every notification for the user read; returns rows touched
    async fn mark_all_read(&self, user_id: &UserId) -> Result<u64>;

    /// Total stored notifications for the user
    async fn count_for_user(&self, user_id: &UserId) -> Result<i64>;
}
