// Notification Service - Feed aggregation and read-state use cases

pub mod feed;
pub mod mark_read;

pub use feed::FeedRequest;

use crate::domain::{FeedItemId, FeedPage, UserId};
use crate::error::Result;
use crate::port::{
    ApplicationStore, JobCatalog, LinkBuilder, NotificationRepository, SeekerProfileStore,
    TimeProvider,
};
use std::sync::Arc;

/// Notification Service
///
/// Facade over the aggregator use cases with the ports wired in once.
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
    profiles: Arc<dyn SeekerProfileStore>,
    applications: Arc<dyn ApplicationStore>,
    jobs: Arc<dyn JobCatalog>,
    time_provider: Arc<dyn TimeProvider>,
    links: Arc<dyn LinkBuilder>,
}

impl NotificationService {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        profiles: Arc<dyn SeekerProfileStore>,
        applications: Arc<dyn ApplicationStore>,
        jobs: Arc<dyn JobCatalog>,
        time_provider: Arc<dyn TimeProvider>,
        links: Arc<dyn LinkBuilder>,
    ) -> Self {
        Self {
            notifications,
            profiles,
            applications,
            jobs,
            time_provider,
            links,
        }
    }

    /// Build the merged feed for one user
    pub async fn feed(&self, req: FeedRequest) -> Result<FeedPage> {
        feed::execute(
            self.notifications.as_ref(),
            self.profiles.as_ref(),
            self.applications.as_ref(),
            self.jobs.as_ref(),
            self.time_provider.as_ref(),
            self.links.as_ref(),
            req,
        )
        .await
    }

    /// Mark one stored notification read; no-op on synthetic ids
    pub async fn mark_read(&self, user_id: &UserId, id: &FeedItemId) -> Result<bool> {
        mark_read::mark_read(self.notifications.as_ref(), user_id, id).await
    }

    /// Mark every stored notification for the user read
    pub async fn mark_all_read(&self, user_id: &UserId) -> Result<u64> {
        mark_read::mark_all_read(self.notifications.as_ref(), user_id).await
    }
}
