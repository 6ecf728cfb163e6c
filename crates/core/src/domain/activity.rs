// Platform Activity Records
//
// Read-side records owned by the wider job board (applications, public job
// postings, seeker profiles). The notification aggregator consumes them;
// nothing here mutates them.

use serde::{Deserialize, Serialize};

use crate::domain::offer::UserId;

/// Application pipeline status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Shortlisted,
    Interviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(ApplicationStatus::Pending),
            "SHORTLISTED" => Some(ApplicationStatus::Shortlisted),
            "INTERVIEWED" => Some(ApplicationStatus::Interviewed),
            "ACCEPTED" => Some(ApplicationStatus::Accepted),
            "REJECTED" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    /// Statuses surfaced in the feed. PENDING submissions are not news.
    pub fn is_update(&self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }

    /// Fixed per-status phrase for the feed message
    pub fn headline(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "was received",
            ApplicationStatus::Shortlisted => "was shortlisted",
            ApplicationStatus::Interviewed => "moved to the interview stage",
            ApplicationStatus::Accepted => "was accepted",
            ApplicationStatus::Rejected => "was not successful",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationStatus::Pending => write!(f, "PENDING"),
            ApplicationStatus::Shortlisted => write!(f, "SHORTLISTED"),
            ApplicationStatus::Interviewed => write!(f, "INTERVIEWED"),
            ApplicationStatus::Accepted => write!(f, "ACCEPTED"),
            ApplicationStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// One job application by a seeker, as tracked by the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: i64,
    pub seeker_id: UserId,
    pub job_id: i64,
    pub job_title: String,
    pub company_name: String,
    pub status: ApplicationStatus,
    pub updated_at: i64, // epoch ms, last status change
}

/// Public job posting, used only for the "new job match" feed source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    pub company_name: String,
    pub state: String,
    pub description: String,
    pub created_at: i64, // epoch ms
}

impl JobPosting {
    /// Textual match against a seeker's stored state and skill tokens,
    /// case-insensitive, over the posting's state and description.
    pub fn matches(&self, state: Option<&str>, skill_tokens: &[String]) -> bool {
        let posting_state = self.state.to_lowercase();
        let description = self.description.to_lowercase();

        if let Some(state) = state {
            let state = state.trim().to_lowercase();
            if !state.is_empty()
                && (posting_state.contains(&state) || description.contains(&state))
            {
                return true;
            }
        }

        skill_tokens.iter().any(|token| {
            let token = token.to_lowercase();
            posting_state.contains(&token) || description.contains(&token)
        })
    }
}

/// Seeker profile snapshot consumed by the aggregator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeekerProfile {
    pub user_id: UserId,
    pub state: Option<String>,
    /// Comma-delimited skill list
    pub skills: Option<String>,
    /// Profile completeness in percent (0-100), scored by the platform
    pub completeness: i32,
    pub cv_count: i32,
    /// Paid plan expiry (epoch ms), if the seeker holds one
    pub plan_expires_at: Option<i64>,
}

impl SeekerProfile {
    /// Up to the first 3 comma-separated skill tokens, trimmed.
    pub fn skill_tokens(&self) -> Vec<String> {
        self.skills
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(3)
            .map(str::to_string)
            .collect()
    }

    /// Whether the profile carries anything to match jobs against.
    pub fn has_search_terms(&self) -> bool {
        self.state.as_deref().is_some_and(|s| !s.trim().is_empty())
            || !self.skill_tokens().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(state: &str, description: &str) -> JobPosting {
        JobPosting {
            id: 1,
            title: "Accountant".to_string(),
            company_name: "Zenith Holdings".to_string(),
            state: state.to_string(),
            description: description.to_string(),
            created_at: 0,
        }
    }

    #[test]
    fn job_match_on_state_or_skill() {
        let job = posting("Lagos", "Senior accountant, IFRS reporting");

        assert!(job.matches(Some("lagos"), &[]));
        assert!(job.matches(None, &["IFRS".to_string()]));
        assert!(!job.matches(Some("Abuja"), &["python".to_string()]));
        // Empty state string never matches everything
        assert!(!job.matches(Some("  "), &[]));
    }

    #[test]
    fn skill_tokens_take_first_three() {
        let profile = SeekerProfile {
            user_id: "seeker-1".to_string(),
            state: None,
            skills: Some("sql, excel , , reporting, audit".to_string()),
            completeness: 80,
            cv_count: 1,
            plan_expires_at: None,
        };
        assert_eq!(profile.skill_tokens(), vec!["sql", "excel", "reporting"]);
        assert!(profile.has_search_terms());
    }

    #[test]
    fn profile_without_terms() {
        let profile = SeekerProfile {
            user_id: "seeker-2".to_string(),
            state: Some("  ".to_string()),
            skills: None,
            completeness: 10,
            cv_count: 0,
            plan_expires_at: None,
        };
        assert!(!profile.has_search_terms());
        assert!(profile.skill_tokens().is_empty());
    }
}
