use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Back-office lifecycle of a submission. The intake pipeline only ever
/// creates records as `New`; later transitions belong to an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "submission_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    New,
    Contacted,
    Converted,
    Spam,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::New => write!(f, "new"),
            SubmissionStatus::Contacted => write!(f, "contacted"),
            SubmissionStatus::Converted => write!(f, "converted"),
            SubmissionStatus::Spam => write!(f, "spam"),
        }
    }
}

/// Where the form was submitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "submission_source", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionSource {
    Website,
    Homepage,
    ServicePage,
    Referral,
    Other,
}

impl Default for SubmissionSource {
    fn default() -> Self {
        SubmissionSource::Website
    }
}

impl SubmissionSource {
    /// Parse the wire value; `None` for anything outside the fixed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "website" => Some(SubmissionSource::Website),
            "homepage" => Some(SubmissionSource::Homepage),
            "service-page" => Some(SubmissionSource::ServicePage),
            "referral" => Some(SubmissionSource::Referral),
            "other" => Some(SubmissionSource::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubmissionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionSource::Website => write!(f, "website"),
            SubmissionSource::Homepage => write!(f, "homepage"),
            SubmissionSource::ServicePage => write!(f, "service-page"),
            SubmissionSource::Referral => write!(f, "referral"),
            SubmissionSource::Other => write!(f, "other"),
        }
    }
}

/// The budget ranges the contact form offers. The empty string is the
/// "unselected" option and is accepted as-is.
pub const BUDGET_RANGES: &[&str] = &[
    "",
    "Under ₹25K",
    "₹25K - ₹50K",
    "₹50K - ₹1L",
    "₹1L - ₹5L",
    "₹5L+",
    "Not Sure",
];

/// Raw contact-form payload as received on the wire.
///
/// Required fields default to empty strings so a missing field surfaces
/// as a field-level validation error rather than a deserialization
/// failure — the validator reports every problem in one pass.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub budget: Option<String>,
    pub service: Option<String>,
    #[serde(default)]
    pub message: String,
    pub source: Option<String>,
    /// Honeypot field. Hidden from human users; any content means a bot.
    pub website: Option<String>,
}

/// A validated, sanitized submission ready for persistence. The store
/// assigns the id, status and timestamps.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub budget: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub source: SubmissionSource,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Default read projection of a stored submission. Deliberately omits
/// `ip_address` and `user_agent`; those are captured for abuse forensics
/// and are not part of normal reads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub budget: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub source: SubmissionSource,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a successful intake response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_parses_only_known_values() {
        assert_eq!(
            SubmissionSource::parse("service-page"),
            Some(SubmissionSource::ServicePage)
        );
        assert_eq!(SubmissionSource::parse("newsletter"), None);
        assert_eq!(SubmissionSource::parse(""), None);
    }

    #[test]
    fn source_display_round_trips() {
        for source in [
            SubmissionSource::Website,
            SubmissionSource::Homepage,
            SubmissionSource::ServicePage,
            SubmissionSource::Referral,
            SubmissionSource::Other,
        ] {
            assert_eq!(SubmissionSource::parse(&source.to_string()), Some(source));
        }
    }

    #[test]
    fn missing_required_fields_deserialize_to_empty() {
        let req: ContactRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_empty());
        assert!(req.email.is_empty());
        assert!(req.message.is_empty());
        assert!(req.website.is_none());
    }

    #[test]
    fn budget_ranges_include_unselected() {
        assert!(BUDGET_RANGES.contains(&""));
        assert!(BUDGET_RANGES.contains(&"Not Sure"));
    }
}
