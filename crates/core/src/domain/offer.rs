// Private Offer Domain Model

use serde::{Deserialize, Serialize};

/// Offer ID (UUID v4)
pub type OfferId = String;

/// Platform user identifier (job seeker or employer)
pub type UserId = String;

/// Private offer lifecycle state
///
/// PENDING -> VIEWED -> ACCEPTED | REJECTED, monotonic. EXPIRED is usually
/// derived at read time (see [`PrivateOffer::derived_status`]); the expiry
/// sweep persists it lazily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    Pending,
    Viewed,
    Accepted,
    Rejected,
    Expired,
}

impl OfferStatus {
    /// Terminal states never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OfferStatus::Accepted | OfferStatus::Rejected)
    }

    /// States that can still change (deadline permitting).
    pub fn is_open(&self) -> bool {
        matches!(self, OfferStatus::Pending | OfferStatus::Viewed)
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferStatus::Pending => write!(f, "PENDING"),
            OfferStatus::Viewed => write!(f, "VIEWED"),
            OfferStatus::Accepted => write!(f, "ACCEPTED"),
            OfferStatus::Rejected => write!(f, "REJECTED"),
            OfferStatus::Expired => write!(f, "EXPIRED"),
        }
    }
}

/// Job seeker decision on an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferDecision {
    Accepted,
    Rejected,
}

impl OfferDecision {
    /// Parse a wire-level decision string. Returns None on anything else;
    /// callers surface that as a validation error before touching the offer.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "accepted" | "accept" => Some(OfferDecision::Accepted),
            "rejected" | "reject" => Some(OfferDecision::Rejected),
            _ => None,
        }
    }

    pub fn as_status(self) -> OfferStatus {
        match self {
            OfferDecision::Accepted => OfferStatus::Accepted,
            OfferDecision::Rejected => OfferStatus::Rejected,
        }
    }
}

impl std::fmt::Display for OfferDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_status())
    }
}

/// Position details carried by a private offer
///
/// Free-text fields; the platform's job taxonomy (types, categories,
/// Nigerian states) is owned by the surrounding application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferTerms {
    pub job_title: String,
    pub description: String,
    pub job_type: String,
    pub category: String,
    pub location_type: String,
    pub city: String,
    pub state: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_period: Option<String>,
    pub experience_level: Option<String>,
    pub education_level: Option<String>,
    /// Comma-delimited skill list
    pub skills: String,
    pub benefits: Option<String>,
    pub start_date: Option<String>,
    /// Personal note from the employer to the candidate
    pub personal_message: Option<String>,
}

/// Private Job Offer Entity
///
/// An employer-initiated, seeker-targeted proposal with its own lifecycle,
/// independent of the public job-posting flow. Never physically deleted;
/// terminal rows remain for history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateOffer {
    pub id: OfferId,
    pub employer_id: UserId,
    pub seeker_id: UserId,

    pub terms: OfferTerms,

    pub status: OfferStatus,
    pub created_at: i64, // epoch ms
    pub viewed_at: Option<i64>,
    pub responded_at: Option<i64>,
    pub response_message: Option<String>,
    /// Response deadline (epoch ms). Set at creation, immutable after.
    pub deadline: i64,
}

impl PrivateOffer {
    /// Create a new offer in PENDING
    ///
    /// # Arguments
    ///
    /// * `id` - Unique offer ID (injected, not generated)
    /// * `created_at` - Creation timestamp in epoch ms (injected, not system time)
    /// * `employer_id` - Offering employer
    /// * `seeker_id` - Targeted job seeker
    /// * `terms` - Position details
    /// * `deadline` - Response deadline in epoch ms
    pub fn new(
        id: impl Into<String>,
        created_at: i64,
        employer_id: impl Into<String>,
        seeker_id: impl Into<String>,
        terms: OfferTerms,
        deadline: i64,
    ) -> Self {
        Self {
            id: id.into(),
            employer_id: employer_id.into(),
            seeker_id: seeker_id.into(),
            terms,
            status: OfferStatus::Pending,
            created_at,
            viewed_at: None,
            responded_at: None,
            response_message: None,
            deadline,
        }
    }

    /// Create a test offer with deterministic ID and timestamps.
    ///
    /// Uses a simple counter (offer-1, offer-2, ...); created_at starts at
    /// 1000 and increments by 1000, deadline is five days later.
    ///
    /// **Note**: This method should only be used in tests. For production
    /// code, always inject ID and time via providers.
    pub fn new_test(employer_id: impl Into<String>, seeker_id: impl Into<String>) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let created_at = (counter * 1000) as i64;

        Self::new(
            format!("offer-{}", counter),
            created_at,
            employer_id,
            seeker_id,
            OfferTerms {
                job_title: "Backend Engineer".to_string(),
                city: "Lagos".to_string(),
                state: "Lagos".to_string(),
                ..OfferTerms::default()
            },
            created_at + 5 * 24 * 60 * 60 * 1000,
        )
    }

    /// Status that must be shown to users: EXPIRED once the deadline has
    /// passed while the offer is still open. Pure; persisted status is
    /// untouched.
    pub fn derived_status(&self, now_millis: i64) -> OfferStatus {
        if self.status.is_open() && now_millis > self.deadline {
            OfferStatus::Expired
        } else {
            self.status
        }
    }

    /// Transition to VIEWED with explicit timestamp.
    ///
    /// Returns true when the transition happened. Any state other than
    /// PENDING is a no-op (repeat views must not overwrite viewed_at or
    /// duplicate the employer notification), so the return value tells the
    /// caller whether to emit the notification.
    pub fn view(&mut self, now_millis: i64) -> bool {
        if self.status != OfferStatus::Pending {
            return false;
        }
        self.status = OfferStatus::Viewed;
        self.viewed_at = Some(now_millis);
        true
    }

    /// Record the seeker's decision with explicit timestamp.
    ///
    /// Fails with `InvalidTransition` when the offer is already terminal or
    /// the deadline has passed (derived EXPIRED), even if the persisted
    /// status is still open. A repeated respond is a definitive error, not
    /// a no-op.
    pub fn respond(
        &mut self,
        decision: OfferDecision,
        message: impl Into<String>,
        now_millis: i64,
    ) -> crate::domain::error::Result<()> {
        let current = self.derived_status(now_millis);
        if !current.is_open() {
            return Err(crate::domain::error::DomainError::InvalidTransition {
                from: current.to_string(),
                to: decision.as_status().to_string(),
            });
        }
        self.status = decision.as_status();
        self.responded_at = Some(now_millis);
        self.response_message = Some(message.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 60 * 60 * 1000;
    const DAY_MS: i64 = 24 * HOUR_MS;

    fn offer_with_deadline(created_at: i64, deadline: i64) -> PrivateOffer {
        PrivateOffer::new(
            "offer-x",
            created_at,
            "employer-1",
            "seeker-1",
            OfferTerms::default(),
            deadline,
        )
    }

    #[test]
    fn starts_pending_with_untouched_timestamps() {
        let offer = offer_with_deadline(1000, 1000 + 5 * DAY_MS);
        assert_eq!(offer.status, OfferStatus::Pending);
        assert!(offer.viewed_at.is_none());
        assert!(offer.responded_at.is_none());
        assert!(offer.response_message.is_none());
    }

    #[test]
    fn view_is_idempotent() {
        let mut offer = offer_with_deadline(0, 5 * DAY_MS);

        assert!(offer.view(HOUR_MS));
        assert_eq!(offer.status, OfferStatus::Viewed);
        assert_eq!(offer.viewed_at, Some(HOUR_MS));

        // Second view must not overwrite viewed_at
        assert!(!offer.view(2 * HOUR_MS));
        assert_eq!(offer.viewed_at, Some(HOUR_MS));
    }

    #[test]
    fn respond_from_pending_and_viewed() {
        let mut pending = offer_with_deadline(0, 5 * DAY_MS);
        assert!(pending
            .respond(OfferDecision::Rejected, "No thanks", HOUR_MS)
            .is_ok());
        assert_eq!(pending.status, OfferStatus::Rejected);

        let mut viewed = offer_with_deadline(0, 5 * DAY_MS);
        viewed.view(HOUR_MS);
        assert!(viewed
            .respond(OfferDecision::Accepted, "Thanks, I accept", 2 * HOUR_MS)
            .is_ok());
        assert_eq!(viewed.status, OfferStatus::Accepted);
        assert_eq!(viewed.responded_at, Some(2 * HOUR_MS));
        assert_eq!(viewed.response_message.as_deref(), Some("Thanks, I accept"));
    }

    #[test]
    fn second_respond_is_a_definitive_error() {
        let mut offer = offer_with_deadline(0, 5 * DAY_MS);
        offer.view(HOUR_MS);
        offer
            .respond(OfferDecision::Accepted, "Thanks, I accept", 2 * HOUR_MS)
            .unwrap();

        let err = offer
            .respond(OfferDecision::Rejected, "", 3 * HOUR_MS)
            .unwrap_err();
        assert!(err.to_string().contains("ACCEPTED"));

        // First result untouched
        assert_eq!(offer.status, OfferStatus::Accepted);
        assert_eq!(offer.responded_at, Some(2 * HOUR_MS));
        assert_eq!(offer.response_message.as_deref(), Some("Thanks, I accept"));
    }

    #[test]
    fn respond_past_deadline_fails_even_when_persisted_pending() {
        let mut offer = offer_with_deadline(0, 2 * DAY_MS);
        assert_eq!(offer.status, OfferStatus::Pending);

        let err = offer
            .respond(OfferDecision::Accepted, "", 3 * DAY_MS)
            .unwrap_err();
        assert!(err.to_string().contains("EXPIRED"));
        assert_eq!(offer.status, OfferStatus::Pending);
        assert!(offer.responded_at.is_none());
    }

    #[test]
    fn derived_status_expires_open_offers_only() {
        let offer = offer_with_deadline(0, 2 * DAY_MS);
        assert_eq!(offer.derived_status(DAY_MS), OfferStatus::Pending);
        // Exactly at the deadline the offer is still open
        assert_eq!(offer.derived_status(2 * DAY_MS), OfferStatus::Pending);
        assert_eq!(offer.derived_status(2 * DAY_MS + 1), OfferStatus::Expired);
        assert_eq!(offer.derived_status(3 * DAY_MS), OfferStatus::Expired);
    }

    #[test]
    fn derived_status_is_monotonic_after_terminal() {
        let mut offer = offer_with_deadline(0, 2 * DAY_MS);
        offer.view(HOUR_MS);
        offer
            .respond(OfferDecision::Accepted, "ok", 2 * HOUR_MS)
            .unwrap();

        // Accepted stays accepted regardless of now, even far past deadline
        assert_eq!(offer.derived_status(0), OfferStatus::Accepted);
        assert_eq!(offer.derived_status(10 * DAY_MS), OfferStatus::Accepted);
    }

    #[test]
    fn decision_parsing() {
        assert_eq!(OfferDecision::parse("accepted"), Some(OfferDecision::Accepted));
        assert_eq!(OfferDecision::parse("REJECTED"), Some(OfferDecision::Rejected));
        assert_eq!(OfferDecision::parse("maybe"), None);
        assert_eq!(OfferDecision::parse(""), None);
    }
}
