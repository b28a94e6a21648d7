//! Job repository.
//!
//! Every operation reads the full job list; filters and searches are linear
//! scans. Slugs must stay unique across stored jobs.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use hiring_models::{CreateJobInput, Job, JobStatus, UpdateJobInput};

use crate::config::Latency;
use crate::document::Collection;
use crate::error::{StoreError, StoreResult};
use crate::fixtures::{JOBS_KEY, JOBS_SEED};
use crate::kv::KeyValueStore;

fn job_not_found(id: &str) -> StoreError {
    StoreError::not_found(format!("Job with ID {} not found", id))
}

fn slug_conflict(slug: &str) -> StoreError {
    StoreError::conflict(format!("Job with slug {} already exists", slug))
}

/// CRUD access to job postings.
pub struct JobRepository {
    jobs: Collection<Job>,
    latency: Latency,
}

impl JobRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, latency: Latency) -> Self {
        Self {
            jobs: Collection::new(store, JOBS_KEY, JOBS_SEED),
            latency,
        }
    }

    pub async fn list(&self) -> StoreResult<Vec<Job>> {
        self.latency.simulate().await;
        self.jobs.load().await
    }

    pub async fn get_by_id(&self, id: &str) -> StoreResult<Job> {
        self.latency.simulate().await;
        self.jobs
            .load()
            .await?
            .into_iter()
            .find(|j| j.id.as_str() == id)
            .ok_or_else(|| job_not_found(id))
    }

    pub async fn get_by_slug(&self, slug: &str) -> StoreResult<Job> {
        self.latency.simulate().await;
        self.jobs
            .load()
            .await?
            .into_iter()
            .find(|j| j.slug == slug)
            .ok_or_else(|| StoreError::not_found(format!("Job with slug {} not found", slug)))
    }

    /// Create a job. Fails with a conflict if the slug is already taken.
    pub async fn create(&self, input: CreateJobInput) -> StoreResult<Job> {
        self.latency.simulate().await;
        let job = self
            .jobs
            .mutate(|jobs| {
                if jobs.iter().any(|j| j.slug == input.slug) {
                    return Err(slug_conflict(&input.slug));
                }
                let job = Job::from_input(input, Utc::now());
                jobs.push(job.clone());
                Ok(job)
            })
            .await?;

        info!(job_id = %job.id, slug = %job.slug, "Created job");
        Ok(job)
    }

    /// Apply a partial update. A slug change may not collide with another job.
    pub async fn update(&self, id: &str, update: UpdateJobInput) -> StoreResult<Job> {
        self.latency.simulate().await;
        let job = self
            .jobs
            .mutate(|jobs| {
                let index = jobs
                    .iter()
                    .position(|j| j.id.as_str() == id)
                    .ok_or_else(|| job_not_found(id))?;

                if let Some(slug) = update.slug.as_deref() {
                    if slug != jobs[index].slug
                        && jobs.iter().any(|j| j.slug == slug && j.id.as_str() != id)
                    {
                        return Err(slug_conflict(slug));
                    }
                }

                jobs[index].apply(update, Utc::now());
                Ok(jobs[index].clone())
            })
            .await?;

        info!(job_id = %job.id, "Updated job");
        Ok(job)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.latency.simulate().await;
        self.jobs
            .mutate(|jobs| {
                let index = jobs
                    .iter()
                    .position(|j| j.id.as_str() == id)
                    .ok_or_else(|| job_not_found(id))?;
                jobs.remove(index);
                Ok(())
            })
            .await?;

        info!(job_id = %id, "Deleted job");
        Ok(())
    }

    pub async fn filter_by_status(&self, status: JobStatus) -> StoreResult<Vec<Job>> {
        self.latency.simulate().await;
        let mut jobs = self.jobs.load().await?;
        jobs.retain(|j| j.status == status);
        Ok(jobs)
    }

    /// Case-insensitive substring match on the title.
    pub async fn search_by_title(&self, query: &str) -> StoreResult<Vec<Job>> {
        self.latency.simulate().await;
        let needle = query.to_lowercase();
        let mut jobs = self.jobs.load().await?;
        jobs.retain(|j| j.title.to_lowercase().contains(&needle));
        Ok(jobs)
    }

    /// Restore the seeded job list.
    pub async fn reset(&self) -> StoreResult<()> {
        self.jobs.reset().await
    }

    pub async fn clear(&self) -> StoreResult<()> {
        self.jobs.clear().await
    }
}
