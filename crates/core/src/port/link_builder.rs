// Outbound Link Builder Port

use crate::domain::OfferId;

/// Builds user-facing navigation URLs for feed items and offers.
/// Treated as an opaque template by the core.
pub trait LinkBuilder: Send + Sync {
    fn offer_link(&self, offer_id: &OfferId) -> String;
    fn job_link(&self, job_id: i64) -> String;
    fn applications_link(&self) -> String;
    fn profile_link(&self) -> String;
    fn cv_link(&self) -> String;
    fn billing_link(&self) -> String;
}

/// Path-template builder (production)
pub struct PathLinkBuilder {
    base: String,
}

impl PathLinkBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for PathLinkBuilder {
    fn default() -> Self {
        Self::new("")
    }
}

impl LinkBuilder for PathLinkBuilder {
    fn offer_link(&self, offer_id: &OfferId) -> String {
        format!("{}/offers/{}", self.base, offer_id)
    }

    fn job_link(&self, job_id: i64) -> String {
        format!("{}/jobs/{}", self.base, job_id)
    }

    fn applications_link(&self) -> String {
        format!("{}/applications", self.base)
    }

    fn profile_link(&self) -> String {
        format!("{}/profile/edit", self.base)
    }

    fn cv_link(&self) -> String {
        format!("{}/profile/cv", self.base)
    }

    fn billing_link(&self) -> String {
        format!("{}/billing", self.base)
    }
}
