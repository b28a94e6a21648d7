//! Candidate repository.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use hiring_models::{Candidate, CandidateStatus, CreateCandidateInput, UpdateCandidateInput};

use crate::config::Latency;
use crate::document::Collection;
use crate::error::{StoreError, StoreResult};
use crate::fixtures::{CANDIDATES_KEY, CANDIDATES_SEED};
use crate::kv::KeyValueStore;

fn candidate_not_found(id: &str) -> StoreError {
    StoreError::not_found(format!("Candidate with ID {} not found", id))
}

/// CRUD access to candidates.
///
/// Attribute order is always derived from array position on create and
/// update. Job references are not checked.
pub struct CandidateRepository {
    candidates: Collection<Candidate>,
    latency: Latency,
}

impl CandidateRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, latency: Latency) -> Self {
        Self {
            candidates: Collection::new(store, CANDIDATES_KEY, CANDIDATES_SEED),
            latency,
        }
    }

    pub async fn list(&self) -> StoreResult<Vec<Candidate>> {
        self.latency.simulate().await;
        self.candidates.load().await
    }

    pub async fn get_by_id(&self, id: &str) -> StoreResult<Candidate> {
        self.latency.simulate().await;
        self.candidates
            .load()
            .await?
            .into_iter()
            .find(|c| c.id.as_str() == id)
            .ok_or_else(|| candidate_not_found(id))
    }

    pub async fn filter_by_job(&self, job_id: &str) -> StoreResult<Vec<Candidate>> {
        self.latency.simulate().await;
        let mut candidates = self.candidates.load().await?;
        candidates.retain(|c| c.job_id.as_str() == job_id);
        Ok(candidates)
    }

    pub async fn filter_by_status(&self, status: CandidateStatus) -> StoreResult<Vec<Candidate>> {
        self.latency.simulate().await;
        let mut candidates = self.candidates.load().await?;
        candidates.retain(|c| c.status == status);
        Ok(candidates)
    }

    pub async fn create(&self, input: CreateCandidateInput) -> StoreResult<Candidate> {
        self.latency.simulate().await;
        let candidate = self
            .candidates
            .mutate(|candidates| {
                let candidate = Candidate::from_input(input, Utc::now());
                candidates.push(candidate.clone());
                Ok(candidate)
            })
            .await?;

        info!(candidate_id = %candidate.id, job_id = %candidate.job_id, "Created candidate");
        Ok(candidate)
    }

    pub async fn update(&self, id: &str, update: UpdateCandidateInput) -> StoreResult<Candidate> {
        self.latency.simulate().await;
        let candidate = self
            .candidates
            .mutate(|candidates| {
                let candidate = candidates
                    .iter_mut()
                    .find(|c| c.id.as_str() == id)
                    .ok_or_else(|| candidate_not_found(id))?;
                candidate.apply(update, Utc::now());
                Ok(candidate.clone())
            })
            .await?;

        info!(candidate_id = %candidate.id, status = %candidate.status, "Updated candidate");
        Ok(candidate)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.latency.simulate().await;
        self.candidates
            .mutate(|candidates| {
                let index = candidates
                    .iter()
                    .position(|c| c.id.as_str() == id)
                    .ok_or_else(|| candidate_not_found(id))?;
                candidates.remove(index);
                Ok(())
            })
            .await?;

        info!(candidate_id = %id, "Deleted candidate");
        Ok(())
    }

    /// Case-insensitive substring match on the `full_name` or `email` attribute.
    pub async fn search_by_name_or_email(&self, query: &str) -> StoreResult<Vec<Candidate>> {
        self.latency.simulate().await;
        let needle = query.to_lowercase();
        let mut candidates = self.candidates.load().await?;
        candidates.retain(|c| c.matches_name_or_email(&needle));
        Ok(candidates)
    }

    /// Restore the seeded candidate list.
    pub async fn reset(&self) -> StoreResult<()> {
        self.candidates.reset().await
    }

    pub async fn clear(&self) -> StoreResult<()> {
        self.candidates.clear().await
    }
}
