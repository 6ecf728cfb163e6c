// Aggregated Notification Feed
//
// The feed is a derived view: stored offer notifications plus synthetic
// events computed from platform records. Nothing in this module persists.

use serde::{Deserialize, Serialize};

use crate::domain::activity::{ApplicationRecord, JobPosting};
use crate::domain::notification::OfferNotification;
use crate::domain::notification::OfferNotificationKind;

/// Feed length for the full notifications page
pub const FULL_FEED_LIMIT: usize = 15;

/// Feed length for the dashboard preview
pub const PREVIEW_FEED_LIMIT: usize = 5;

/// Feed item identifier: stored notifications keep their numeric row id,
/// derived events get a synthesized string id (`app-7`, `job-12`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedItemId {
    Stored(i64),
    Synthetic(String),
}

impl std::fmt::Display for FeedItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedItemId::Stored(id) => write!(f, "{}", id),
            FeedItemId::Synthetic(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    NewOffer,
    OfferViewed,
    OfferExpired,
    ApplicationUpdate,
    JobMatch,
    ProfileReminder,
    CvReminder,
    SubscriptionReminder,
}

/// Reminder kinds a user can dismiss for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    ProfileIncomplete,
    CvMissing,
    SubscriptionExpiring,
}

impl ReminderKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "profile_incomplete" => Some(ReminderKind::ProfileIncomplete),
            "cv_missing" => Some(ReminderKind::CvMissing),
            "subscription_expiring" => Some(ReminderKind::SubscriptionExpiring),
            _ => None,
        }
    }
}

/// One entry of the merged feed, in display shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: FeedItemId,
    pub kind: FeedKind,
    pub title: String,
    pub message: String,
    pub company: Option<String>,
    pub is_read: bool,
    pub created_at: i64, // epoch ms
    pub link: String,
}

/// One event from any of the aggregator's sources.
///
/// Closed union: each variant maps into [`FeedItem`] through exactly one
/// arm of [`FeedEvent::into_item`]; the aggregator never inspects loose
/// maps at runtime.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// Stored offer notification (source 1)
    Offer(OfferNotification),
    /// Application status change within the window (source 2); always unread
    Application(ApplicationRecord),
    /// Fresh job posting matching the profile (source 3); always unread
    JobMatch(JobPosting),
    /// Synthetic profile-completeness reminder (source 4)
    ProfileReminder { created_at: i64 },
    /// Synthetic missing-CV reminder (source 5)
    CvReminder { created_at: i64 },
    /// Synthetic plan-expiry reminder (source 6)
    SubscriptionReminder { created_at: i64, expires_at: i64 },
}

impl FeedEvent {
    /// Map the event into the common display shape. `link` is built by the
    /// caller through the outbound link port.
    pub fn into_item(self, link: String) -> FeedItem {
        match self {
            FeedEvent::Offer(n) => FeedItem {
                id: FeedItemId::Stored(n.id),
                kind: match n.kind {
                    OfferNotificationKind::NewOffer => FeedKind::NewOffer,
                    OfferNotificationKind::OfferViewed => FeedKind::OfferViewed,
                    OfferNotificationKind::OfferExpired => FeedKind::OfferExpired,
                },
                title: n.kind.title().to_string(),
                message: n.kind.message().to_string(),
                company: None,
                is_read: n.is_read,
                created_at: n.created_at,
                link,
            },
            FeedEvent::Application(app) => FeedItem {
                id: FeedItemId::Synthetic(format!("app-{}", app.id)),
                kind: FeedKind::ApplicationUpdate,
                title: "Application Update".to_string(),
                message: format!(
                    "Your application for {} {}.",
                    app.job_title,
                    app.status.headline()
                ),
                company: Some(app.company_name),
                // No persisted read flag exists for this source
                is_read: false,
                created_at: app.updated_at,
                link,
            },
            FeedEvent::JobMatch(job) => FeedItem {
                id: FeedItemId::Synthetic(format!("job-{}", job.id)),
                kind: FeedKind::JobMatch,
                title: "New Job Match".to_string(),
                message: format!("{} is hiring: {}.", job.company_name, job.title),
                company: Some(job.company_name),
                is_read: false,
                created_at: job.created_at,
                link,
            },
            FeedEvent::ProfileReminder { created_at } => FeedItem {
                id: FeedItemId::Synthetic("reminder-profile".to_string()),
                kind: FeedKind::ProfileReminder,
                title: "Complete Your Profile".to_string(),
                message: "Employers find complete profiles first. Finish setting up yours."
                    .to_string(),
                company: None,
                is_read: false,
                created_at,
                link,
            },
            FeedEvent::CvReminder { created_at } => FeedItem {
                id: FeedItemId::Synthetic("reminder-cv".to_string()),
                kind: FeedKind::CvReminder,
                title: "Upload Your CV".to_string(),
                message: "You have no CV on file. Upload one to start applying.".to_string(),
                company: None,
                is_read: false,
                created_at,
                link,
            },
            FeedEvent::SubscriptionReminder {
                created_at,
                expires_at: _,
            } => FeedItem {
                id: FeedItemId::Synthetic("reminder-subscription".to_string()),
                kind: FeedKind::SubscriptionReminder,
                title: "Subscription Expiring Soon".to_string(),
                message: "Your paid plan expires within 7 days. Renew to keep your benefits."
                    .to_string(),
                company: None,
                is_read: false,
                created_at,
                link,
            },
        }
    }
}

/// Merged feed plus the pre-truncation unread count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    pub unread_count: usize,
}

/// Merge mapped items into the final page.
///
/// Stable sort by created_at descending (equal timestamps keep source
/// insertion order), unread counted over the FULL sequence, truncation
/// strictly last.
pub fn merge_items(mut items: Vec<FeedItem>, max_items: usize) -> FeedPage {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let unread_count = items.iter().filter(|item| !item.is_read).count();
    items.truncate(max_items);
    FeedPage { items, unread_count }
}
