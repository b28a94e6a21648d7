//! Seed fixtures and the storage keys they initialize.

/// Key of the single active session.
pub const SESSION_KEY: &str = "hiring_dashboard_session";

/// Key of the user list.
pub const USERS_KEY: &str = "hiring_dashboard_users";

/// Key of the job list.
pub const JOBS_KEY: &str = "hiring_dashboard_jobs";

/// Key of the candidate list.
pub const CANDIDATES_KEY: &str = "hiring_dashboard_candidates";

pub const USERS_SEED: &str = include_str!("../fixtures/users.json");
pub const JOBS_SEED: &str = include_str!("../fixtures/jobs.json");
pub const CANDIDATES_SEED: &str = include_str!("../fixtures/candidates.json");
