//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use joblink_core::domain::{FeedItem, FeedItemId, OfferTerms, PrivateOffer, ReminderKind};
use serde::{Deserialize, Serialize};

/// offer.create.v1 - Extend a private offer to a seeker
#[derive(Debug, Deserialize)]
pub struct CreateOfferRequest {
    pub employer_id: String,
    pub seeker_id: String,
    pub terms: OfferTerms,
    /// Response deadline, epoch ms
    pub deadline: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOfferResponse {
    pub offer_id: String,
    pub status: String,
}

/// offer.list.v1 - Offers for one party, derived statuses applied
#[derive(Debug, Deserialize)]
pub struct ListOffersRequest {
    pub user_id: String,
    /// "seeker" (default) or "employer"
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "seeker".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct OfferSummary {
    pub offer_id: String,
    pub job_title: String,
    pub city: String,
    pub state: String,
    pub status: String,
    pub created_at: i64,
    pub deadline: i64,
}

impl From<&PrivateOffer> for OfferSummary {
    fn from(offer: &PrivateOffer) -> Self {
        Self {
            offer_id: offer.id.clone(),
            job_title: offer.terms.job_title.clone(),
            city: offer.terms.city.clone(),
            state: offer.terms.state.clone(),
            status: offer.status.to_string(),
            created_at: offer.created_at,
            deadline: offer.deadline,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListOffersResponse {
    pub offers: Vec<OfferSummary>,
}

/// offer.get.v1 - One offer in full, scoped to either party
#[derive(Debug, Deserialize)]
pub struct GetOfferRequest {
    pub offer_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetOfferResponse {
    pub offer: PrivateOffer,
}

/// offer.view.v1 - Seeker opened the offer
#[derive(Debug, Deserialize)]
pub struct ViewOfferRequest {
    pub offer_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewOfferResponse {
    pub offer_id: String,
    pub status: String,
}

/// offer.respond.v1 - Seeker accepts or rejects
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub offer_id: String,
    pub user_id: String,
    pub decision: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RespondResponse {
    pub offer_id: String,
    pub status: String,
    pub responded_at: Option<i64>,
}

/// notifications.feed.v1 - Merged feed for one user
#[derive(Debug, Deserialize)]
pub struct FeedRequest {
    pub user_id: String,
    /// Dashboard preview (5 items) instead of the full page (15)
    #[serde(default)]
    pub preview: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedResponse {
    pub items: Vec<FeedItem>,
    pub unread_count: usize,
}

/// notifications.mark_read.v1 - Mark one feed item read
#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub user_id: String,
    /// Stored numeric id or synthetic string id
    pub notification_id: FeedItemId,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkReadResponse {
    /// false when the id was synthetic (documented no-op)
    pub updated: bool,
}

/// notifications.mark_all_read.v1
#[derive(Debug, Deserialize)]
pub struct MarkAllReadRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

/// notifications.dismiss.v1 - Hide a synthetic reminder for the session
#[derive(Debug, Deserialize)]
pub struct DismissRequest {
    pub user_id: String,
    pub reminder: ReminderKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct DismissResponse {
    pub dismissed: bool,
}

/// admin.expire_sweep.v1 - Persist EXPIRED on lapsed offers
#[derive(Debug, Deserialize)]
pub struct SweepRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepResponse {
    pub swept: u64,
}

/// admin.stats.v1 - Offer counts and uptime
#[derive(Debug, Deserialize)]
pub struct StatsRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub pending_offers: i64,
    pub viewed_offers: i64,
    pub accepted_offers: i64,
    pub rejected_offers: i64,
    pub expired_offers: i64,
    pub uptime_seconds: i64,
}
