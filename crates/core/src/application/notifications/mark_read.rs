// Mark Read Use Cases

use crate::domain::{FeedItemId, UserId};
use crate::error::{AppError, Result};
use crate::port::NotificationRepository;
use tracing::debug;

/// Mark one feed item read.
///
/// Only stored notifications carry a persisted read flag. Synthetic ids are
/// a documented no-op (returns false): derived items are suppressed via the
/// session dismissal set instead. An unknown or foreign stored id is
/// NotFound, not a silent success.
pub async fn mark_read(
    notifications: &dyn NotificationRepository,
    user_id: &UserId,
    id: &FeedItemId,
) -> Result<bool> {
    match id {
        FeedItemId::Synthetic(id) => {
            debug!(%id, "mark_read on synthetic feed item is a no-op");
            Ok(false)
        }
        FeedItemId::Stored(id) => {
            if notifications.mark_read(*id, user_id).await? {
                Ok(true)
            } else {
                Err(AppError::NotFound(format!("Notification {} not found", id)))
            }
        }
    }
}

/// Mark all stored notifications for the user read.
///
/// Session dismissals of synthetic reminders are untouched; a separate
/// dismiss operation toggles those.
pub async fn mark_all_read(
    notifications: &dyn NotificationRepository,
    user_id: &UserId,
) -> Result<u64> {
    notifications.mark_all_read(user_id).await
}
