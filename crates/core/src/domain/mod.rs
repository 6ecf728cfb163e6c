// Domain Layer - Pure business logic and entities

pub mod activity;
pub mod error;
pub mod feed;
pub mod notification;
pub mod offer;

// Re-exports
pub use activity::{ApplicationRecord, ApplicationStatus, JobPosting, SeekerProfile};
pub use error::DomainError;
pub use feed::{
    FeedEvent, FeedItem, FeedItemId, FeedKind, FeedPage, ReminderKind, FULL_FEED_LIMIT,
    PREVIEW_FEED_LIMIT,
};
pub use notification::{
    NotificationDraft, NotificationId, OfferNotification, OfferNotificationKind,
};
pub use offer::{OfferDecision, OfferId, OfferStatus, OfferTerms, PrivateOffer, UserId};
