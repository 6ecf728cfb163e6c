// Stored Offer Notification Model

use serde::{Deserialize, Serialize};

use crate::domain::offer::{OfferId, UserId};

/// Stored notification ID (SQLite rowid)
pub type NotificationId = i64;

/// Kind of a stored offer notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferNotificationKind {
    /// Offer created; addressed to the job seeker
    NewOffer,
    /// Offer first viewed by the seeker; addressed to the employer
    OfferViewed,
    /// Offer lapsed without a response; addressed to the job seeker
    OfferExpired,
}

impl OfferNotificationKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new_offer" => Some(OfferNotificationKind::NewOffer),
            "offer_viewed" => Some(OfferNotificationKind::OfferViewed),
            "offer_expired" => Some(OfferNotificationKind::OfferExpired),
            _ => None,
        }
    }

    /// Fixed kind -> headline table used by the feed
    pub fn title(&self) -> &'static str {
        match self {
            OfferNotificationKind::NewOffer => "New Private Job Offer",
            OfferNotificationKind::OfferViewed => "Offer Viewed",
            OfferNotificationKind::OfferExpired => "Offer Expired",
        }
    }

    /// Fixed kind -> message table used by the feed
    pub fn message(&self) -> &'static str {
        match self {
            OfferNotificationKind::NewOffer => "You received a private job offer!",
            OfferNotificationKind::OfferViewed => {
                "Your private job offer was viewed by the candidate."
            }
            OfferNotificationKind::OfferExpired => {
                "A private job offer expired without a response."
            }
        }
    }
}

impl std::fmt::Display for OfferNotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferNotificationKind::NewOffer => write!(f, "new_offer"),
            OfferNotificationKind::OfferViewed => write!(f, "offer_viewed"),
            OfferNotificationKind::OfferExpired => write!(f, "offer_expired"),
        }
    }
}

/// Stored Offer Notification Entity
///
/// Created alongside the lifecycle transition that causes it; mutated only
/// by the mark-read operations; retained indefinitely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferNotification {
    pub id: NotificationId,
    pub offer_id: OfferId,
    pub recipient_id: UserId,
    pub kind: OfferNotificationKind,
    pub is_read: bool,
    pub created_at: i64, // epoch ms
}

/// Insert shape for a notification; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub offer_id: OfferId,
    pub recipient_id: UserId,
    pub kind: OfferNotificationKind,
    pub created_at: i64,
}

impl NotificationDraft {
    pub fn new(
        offer_id: impl Into<String>,
        recipient_id: impl Into<String>,
        kind: OfferNotificationKind,
        created_at: i64,
    ) -> Self {
        Self {
            offer_id: offer_id.into(),
            recipient_id: recipient_id.into(),
            kind,
            created_at,
        }
    }
}
