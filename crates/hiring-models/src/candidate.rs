//! Candidates who applied to a job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::ModelError;
use crate::id::generate_entity_id;
use crate::job::JobId;

/// Attribute key searched for a candidate's name.
pub const FULL_NAME_KEY: &str = "full_name";

/// Attribute key searched for a candidate's email.
pub const EMAIL_KEY: &str = "email";

/// Unique identifier for a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    /// Generate a new `cand_<YYYYMMDD>_<NNNN>` id.
    pub fn generate() -> Self {
        Self(generate_entity_id("cand"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CandidateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Where a candidate is in the hiring pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    #[default]
    New,
    InReview,
    Interview,
    Accepted,
    Rejected,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::New => "new",
            CandidateStatus::InReview => "in_review",
            CandidateStatus::Interview => "interview",
            CandidateStatus::Accepted => "accepted",
            CandidateStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CandidateStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(CandidateStatus::New),
            "in_review" => Ok(CandidateStatus::InReview),
            "interview" => Ok(CandidateStatus::Interview),
            "accepted" => Ok(CandidateStatus::Accepted),
            "rejected" => Ok(CandidateStatus::Rejected),
            other => Err(ModelError::UnknownCandidateStatus(other.to_string())),
        }
    }
}

/// A free-form key/label/value pair with a display position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateAttribute {
    pub key: String,
    pub label: String,
    pub value: String,
    pub order: u32,
}

/// Attribute as supplied by callers. Any `order` sent along is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeInput {
    pub key: String,
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl AttributeInput {
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value: value.into(),
            order: None,
        }
    }
}

/// Assign `order` from array position, 1-indexed.
pub fn ordered_attributes(inputs: Vec<AttributeInput>) -> Vec<CandidateAttribute> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, attr)| CandidateAttribute {
            key: attr.key,
            label: attr.label,
            value: attr.value,
            order: index as u32 + 1,
        })
        .collect()
}

/// A candidate record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub attributes: Vec<CandidateAttribute>,
    pub job_id: JobId,
    #[serde(default)]
    pub status: CandidateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Candidate {
    /// Build a new candidate from a create request.
    pub fn from_input(input: CreateCandidateInput, now: DateTime<Utc>) -> Self {
        Self {
            id: CandidateId::generate(),
            attributes: ordered_attributes(input.attributes),
            job_id: input.job_id,
            status: input.status.unwrap_or_default(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Merge the fields present in `update` and refresh `updated_at`.
    pub fn apply(&mut self, update: UpdateCandidateInput, now: DateTime<Utc>) {
        if let Some(attributes) = update.attributes {
            self.attributes = ordered_attributes(attributes);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Some(now);
    }

    /// Value of the first attribute with the given key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }

    pub fn full_name(&self) -> Option<&str> {
        self.attribute(FULL_NAME_KEY)
    }

    pub fn email(&self) -> Option<&str> {
        self.attribute(EMAIL_KEY)
    }

    /// Case-insensitive substring match on the name or email attribute.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_name_or_email(&self, needle: &str) -> bool {
        let name = self.full_name().unwrap_or_default().to_lowercase();
        let email = self.email().unwrap_or_default().to_lowercase();
        name.contains(needle) || email.contains(needle)
    }
}

/// Request body for creating a candidate.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidateInput {
    pub attributes: Vec<AttributeInput>,
    #[validate(custom(function = "validate_job_id"))]
    pub job_id: JobId,
    #[serde(default)]
    pub status: Option<CandidateStatus>,
}

fn validate_job_id(job_id: &JobId) -> Result<(), validator::ValidationError> {
    if job_id.as_str().trim().is_empty() {
        let mut err = validator::ValidationError::new("job_id");
        err.message = Some("Job ID is required".into());
        return Err(err);
    }
    Ok(())
}

/// Partial update for a candidate. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidateInput {
    #[serde(default)]
    pub attributes: Option<Vec<AttributeInput>>,
    #[serde(default)]
    pub status: Option<CandidateStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input() -> CreateCandidateInput {
        serde_json::from_value(json!({
            "jobId": "job_20251001_0001",
            "attributes": [
                { "key": "full_name", "label": "Full Name", "value": "Aurelie Yukiko", "order": 9 },
                { "key": "email", "label": "Email", "value": "aurelie@example.com", "order": 3 },
                { "key": "domicile", "label": "Domicile", "value": "Jakarta" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_order_follows_position() {
        let candidate = Candidate::from_input(input(), Utc::now());
        let orders: Vec<u32> = candidate.attributes.iter().map(|a| a.order).collect();

        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(candidate.status, CandidateStatus::New);
        assert!(candidate.id.as_str().starts_with("cand_"));
    }

    #[test]
    fn test_apply_reorders_attributes() {
        let mut candidate = Candidate::from_input(input(), Utc::now());

        candidate.apply(
            UpdateCandidateInput {
                attributes: Some(vec![
                    AttributeInput { order: Some(7), ..AttributeInput::new("email", "Email", "new@example.com") },
                    AttributeInput::new("full_name", "Full Name", "Aurelie Y."),
                ]),
                status: None,
            },
            Utc::now(),
        );

        assert_eq!(candidate.attributes[0].key, "email");
        assert_eq!(candidate.attributes[0].order, 1);
        assert_eq!(candidate.attributes[1].order, 2);
        assert_eq!(candidate.status, CandidateStatus::New);
    }

    #[test]
    fn test_name_or_email_match() {
        let candidate = Candidate::from_input(input(), Utc::now());

        assert!(candidate.matches_name_or_email("yukiko"));
        assert!(candidate.matches_name_or_email("@example.com"));
        assert!(!candidate.matches_name_or_email("jakarta"));
    }

    #[test]
    fn test_missing_status_defaults_to_new() {
        let candidate: Candidate = serde_json::from_value(json!({
            "id": "cand_20251001_0001",
            "jobId": "job_20251001_0001",
            "attributes": []
        }))
        .unwrap();

        assert_eq!(candidate.status, CandidateStatus::New);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("in_review".parse::<CandidateStatus>().unwrap(), CandidateStatus::InReview);
        assert!("hired".parse::<CandidateStatus>().is_err());
    }
}
