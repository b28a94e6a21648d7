//! Job postings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use crate::error::ModelError;
use crate::id::generate_entity_id;

/// Unique identifier for a job posting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new `job_<YYYYMMDD>_<NNNN>` id.
    pub fn generate() -> Self {
        Self(generate_entity_id("job"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Publication status of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Active,
    Inactive,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Inactive => "inactive",
            JobStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(JobStatus::Active),
            "inactive" => Ok(JobStatus::Inactive),
            "closed" => Ok(JobStatus::Closed),
            other => Err(ModelError::UnknownJobStatus(other.to_string())),
        }
    }
}

/// Advertised salary band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_salary_bounds"))]
pub struct SalaryRange {
    pub min: i64,
    pub max: i64,
    pub currency: String,
    pub display_text: String,
}

fn validate_salary_bounds(range: &SalaryRange) -> Result<(), ValidationError> {
    if range.min > range.max {
        let mut err = ValidationError::new("salary_bounds");
        err.message = Some("Minimum salary cannot exceed maximum salary".into());
        return Err(err);
    }
    Ok(())
}

/// Display metadata for the job list card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCard {
    pub badge: String,
    pub started_on_text: String,
    pub cta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    pub required: bool,
}

/// One field requested on the application form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub key: String,
    pub validation: FieldValidation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSection {
    pub title: String,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub sections: Vec<FormSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConfiguration {
    pub application_form: ApplicationForm,
}

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub slug: String,
    pub title: String,
    pub status: JobStatus,
    pub salary_range: SalaryRange,
    pub list_card: ListCard,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<JobConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Build a new job from a create request, assigning id and timestamps.
    pub fn from_input(input: CreateJobInput, now: DateTime<Utc>) -> Self {
        Self {
            id: JobId::generate(),
            slug: input.slug,
            title: input.title,
            status: input.status,
            salary_range: input.salary_range,
            list_card: input.list_card,
            configuration: input.configuration,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Merge the fields present in `update` and refresh `updated_at`.
    pub fn apply(&mut self, update: UpdateJobInput, now: DateTime<Utc>) {
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(salary_range) = update.salary_range {
            self.salary_range = salary_range;
        }
        if let Some(list_card) = update.list_card {
            self.list_card = list_card;
        }
        if let Some(configuration) = update.configuration {
            self.configuration = Some(configuration);
        }
        self.updated_at = Some(now);
    }
}

/// Request body for creating a job.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobInput {
    #[validate(length(min = 1, message = "Slug is required"))]
    pub slug: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub status: JobStatus,
    #[validate(nested)]
    pub salary_range: SalaryRange,
    pub list_card: ListCard,
    #[serde(default)]
    pub configuration: Option<JobConfiguration>,
}

/// Partial update for a job. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "Slug cannot be empty"))]
    pub slug: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    #[validate(nested)]
    pub salary_range: Option<SalaryRange>,
    #[serde(default)]
    pub list_card: Option<ListCard>,
    #[serde(default)]
    pub configuration: Option<JobConfiguration>,
}
