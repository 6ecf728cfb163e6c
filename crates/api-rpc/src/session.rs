//! Session-scoped reminder dismissals
//!
//! Synthetic reminders have no persisted read state; dismissing one hides
//! it for the rest of the session only. The set lives here, in the API
//! layer, and is handed to the aggregator as an explicit input so the feed
//! build stays a pure function of its arguments.

use joblink_core::domain::ReminderKind;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct SessionDismissals {
    by_user: Mutex<HashMap<String, HashSet<ReminderKind>>>,
}

impl SessionDismissals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dismissal for the user
    pub fn dismiss(&self, user_id: &str, kind: ReminderKind) {
        let mut by_user = self.by_user.lock().expect("dismissal lock poisoned");
        by_user.entry(user_id.to_string()).or_default().insert(kind);
    }

    /// Snapshot of the user's dismissed kinds
    pub fn dismissed_for(&self, user_id: &str) -> HashSet<ReminderKind> {
        let by_user = self.by_user.lock().expect("dismissal lock poisoned");
        by_user.get(user_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismissals_are_per_user() {
        let sessions = SessionDismissals::new();
        sessions.dismiss("seeker-1", ReminderKind::CvMissing);

        assert!(sessions
            .dismissed_for("seeker-1")
            .contains(&ReminderKind::CvMissing));
        assert!(sessions.dismissed_for("seeker-2").is_empty());
    }

    #[test]
    fn dismiss_is_idempotent() {
        let sessions = SessionDismissals::new();
        sessions.dismiss("seeker-1", ReminderKind::ProfileIncomplete);
        sessions.dismiss("seeker-1", ReminderKind::ProfileIncomplete);
        assert_eq!(sessions.dismissed_for("seeker-1").len(), 1);
    }
}
