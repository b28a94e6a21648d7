//! Shared data models for the hiring dashboard.
//!
//! This crate provides Serde-serializable types for:
//! - Users, roles and login sessions
//! - Job postings and their application-form configuration
//! - Candidates and their ordered attributes
//! - Wire-form key translation (`snake_case` on disk, `camelCase` in memory)

pub mod candidate;
pub mod case;
pub mod error;
pub mod id;
pub mod job;
pub mod session;
pub mod user;

// Re-export common types
pub use candidate::{
    AttributeInput, Candidate, CandidateAttribute, CandidateId, CandidateStatus,
    CreateCandidateInput, UpdateCandidateInput,
};
pub use case::{camelize_keys, snake_case_keys};
pub use error::ModelError;
pub use id::{generate_entity_id, generate_token};
pub use job::{
    ApplicationForm, CreateJobInput, FieldValidation, FormField, FormSection, Job, JobConfiguration,
    JobId, JobStatus, ListCard, SalaryRange, UpdateJobInput,
};
pub use session::{Session, SESSION_TTL_HOURS};
pub use user::{Role, User, UserId, UserRecord};
