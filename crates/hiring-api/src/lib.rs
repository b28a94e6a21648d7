//! Hiring dashboard HTTP server.
//!
//! This crate provides:
//! - Session auth over the stored user list, with a route guard for pages
//! - Server-rendered dashboard, login and error pages
//! - JSON API for jobs, candidates and maintenance
//! - Security headers, request ids and Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod security;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::{AuthError, AuthService};
pub use state::AppState;
