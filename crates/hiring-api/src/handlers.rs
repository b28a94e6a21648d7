//! Request handlers.

pub mod admin;
pub mod auth;
pub mod candidates;
pub mod health;
pub mod jobs;
pub mod web;

pub use health::*;

use serde::Serialize;

/// `{ "data": ... }` envelope used by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Body returned after a delete.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: String,
    pub deleted: bool,
}

impl DeletedResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: true,
        }
    }
}
