// Activity Read Ports (Interfaces)
//
// The aggregator's view onto records owned by the wider platform. Read-only
// here; the surrounding application writes them.

use crate::domain::{ApplicationRecord, JobPosting, SeekerProfile, UserId};
use crate::error::Result;
use async_trait::async_trait;

/// Seeker profile lookups
#[async_trait]
pub trait SeekerProfileStore: Send + Sync {
    async fn find(&self, user_id: &UserId) -> Result<Option<SeekerProfile>>;
}

/// Application records for the status-change feed source
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Applications of the seeker whose status changed at or after `since_millis`
    async fn recent_updates(
        &self,
        seeker_id: &UserId,
        since_millis: i64,
    ) -> Result<Vec<ApplicationRecord>>;
}

/// Public job postings for the job-match feed source
#[async_trait]
pub trait JobCatalog: Send + Sync {
    /// Postings created at or after `since_millis`
    async fn created_since(&self, since_millis: i64) -> Result<Vec<JobPosting>>;
}
