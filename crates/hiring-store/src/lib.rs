//! Hiring dashboard storage.
//!
//! This crate provides:
//! - A key/value backend trait with memory and file implementations
//! - JSON-array collections persisted in `snake_case` wire form
//! - Seed fixtures for users, jobs and candidates
//! - Repositories for users, the active session, jobs and candidates

pub mod candidates;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod fixtures;
pub mod jobs;
pub mod kv;
pub mod session;
pub mod users;

pub use candidates::CandidateRepository;
pub use client::HiringStore;
pub use config::{Latency, StoreConfig, DEFAULT_LATENCY_MS};
pub use document::{decode, encode, read_document, write_document, Collection};
pub use error::{StoreError, StoreResult};
pub use fixtures::{CANDIDATES_KEY, JOBS_KEY, SESSION_KEY, USERS_KEY};
pub use jobs::JobRepository;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use session::SessionStore;
pub use users::UserRepository;
