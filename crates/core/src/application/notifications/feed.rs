// Feed Aggregation Use Case
//
// Pulls six independent sources, maps each through its FeedEvent variant,
// and hands the result to the domain merge. Read-only: identical inputs
// (same rows, same "now") always yield the identical page.

use std::collections::HashSet;

use crate::domain::{feed, FeedEvent, FeedItem, FeedPage, ReminderKind};
use crate::error::Result;
use crate::port::{
    ApplicationStore, JobCatalog, LinkBuilder, NotificationRepository, SeekerProfileStore,
    TimeProvider,
};
use serde::{Deserialize, Serialize};

/// Application status changes are surfaced for 7 days
pub const APPLICATION_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Job matches consider postings from the last 24 hours
pub const JOB_MATCH_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Subscription reminder fires within 7 days of plan expiry
pub const PLAN_EXPIRY_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Profiles below this completeness trigger the profile reminder
pub const PROFILE_COMPLETENESS_THRESHOLD: i32 = 60;

/// Feed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRequest {
    pub user_id: String,
    /// Page cap: FULL_FEED_LIMIT or PREVIEW_FEED_LIMIT at the two call sites
    pub max_items: usize,
    /// Reminder kinds the user dismissed this session; explicit input so the
    /// aggregator stays a pure function of its arguments
    #[serde(default)]
    pub dismissed: HashSet<ReminderKind>,
}

impl FeedRequest {
    pub fn new(user_id: impl Into<String>, max_items: usize) -> Self {
        Self {
            user_id: user_id.into(),
            max_items,
            dismissed: HashSet::new(),
        }
    }
}

/// Execute the feed build.
///
/// Source order matters: the concatenation order below is the stable-sort
/// tie-break for equal timestamps. Unread is counted before truncation, so
/// entries beyond the page cap still count. No deduplication across
/// sources: an application event and a job match for the same job both
/// stay and both count.
pub async fn execute(
    notifications: &dyn NotificationRepository,
    profiles: &dyn SeekerProfileStore,
    applications: &dyn ApplicationStore,
    jobs: &dyn JobCatalog,
    time_provider: &dyn TimeProvider,
    links: &dyn LinkBuilder,
    req: FeedRequest,
) -> Result<FeedPage> {
    let now = time_provider.now_millis();
    let mut items: Vec<FeedItem> = Vec::new();

    // 1. Stored offer notifications
    for n in notifications.find_for_user(&req.user_id).await? {
        let link = links.offer_link(&n.offer_id);
        items.push(FeedEvent::Offer(n).into_item(link));
    }

    // 2. Application status changes within the window, always unread
    let since = now - APPLICATION_WINDOW_MS;
    for app in applications.recent_updates(&req.user_id, since).await? {
        if !app.status.is_update() {
            continue;
        }
        let link = links.applications_link();
        items.push(FeedEvent::Application(app).into_item(link));
    }

    let profile = profiles.find(&req.user_id).await?;

    // 3. Fresh postings matched against the stored state/skills
    if let Some(profile) = &profile {
        if profile.has_search_terms() {
            let state = profile.state.as_deref();
            let tokens = profile.skill_tokens();
            for job in jobs.created_since(now - JOB_MATCH_WINDOW_MS).await? {
                if job.matches(state, &tokens) {
                    let link = links.job_link(job.id);
                    items.push(FeedEvent::JobMatch(job).into_item(link));
                }
            }
        }
    }

    // 4-6. Session-dismissable reminders, recomputed on every call with
    // created_at = now so they surface at the top of the page
    if let Some(profile) = &profile {
        if profile.completeness < PROFILE_COMPLETENESS_THRESHOLD
            && !req.dismissed.contains(&ReminderKind::ProfileIncomplete)
        {
            items.push(
                FeedEvent::ProfileReminder { created_at: now }.into_item(links.profile_link()),
            );
        }

        if profile.cv_count == 0 && !req.dismissed.contains(&ReminderKind::CvMissing) {
            items.push(FeedEvent::CvReminder { created_at: now }.into_item(links.cv_link()));
        }

        if let Some(expires_at) = profile.plan_expires_at {
            if expires_at > now
                && expires_at <= now + PLAN_EXPIRY_WINDOW_MS
                && !req.dismissed.contains(&ReminderKind::SubscriptionExpiring)
            {
                items.push(
                    FeedEvent::SubscriptionReminder {
                        created_at: now,
                        expires_at,
                    }
                    .into_item(links.billing_link()),
                );
            }
        }
    }

    Ok(feed::merge_items(items, req.max_items))
}
