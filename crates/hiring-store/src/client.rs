//! Store handle bundling the backend and every repository.

use std::sync::Arc;

use tracing::info;

use crate::candidates::CandidateRepository;
use crate::config::{Latency, StoreConfig};
use crate::error::StoreResult;
use crate::jobs::JobRepository;
use crate::kv::{FileStore, KeyValueStore, MemoryStore};
use crate::session::SessionStore;
use crate::users::UserRepository;

/// Shared access to all hiring data.
#[derive(Clone)]
pub struct HiringStore {
    backend: Arc<dyn KeyValueStore>,
    latency: Latency,
    pub users: Arc<UserRepository>,
    pub session: Arc<SessionStore>,
    pub jobs: Arc<JobRepository>,
    pub candidates: Arc<CandidateRepository>,
}

impl HiringStore {
    /// Create a store from configuration.
    ///
    /// Uses the file backend when `data_dir` is set, memory otherwise.
    pub async fn new(config: StoreConfig) -> StoreResult<Self> {
        let backend: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => {
                info!("Using file store at {}", dir.display());
                Arc::new(FileStore::open(dir).await?)
            }
            None => {
                info!("Using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::with_backend(backend, Latency::new(config.latency)))
    }

    /// Create a store from environment variables.
    pub async fn from_env() -> StoreResult<Self> {
        Self::new(StoreConfig::from_env()).await
    }

    /// In-memory store without artificial delay.
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryStore::new()), Latency::none())
    }

    pub fn with_backend(backend: Arc<dyn KeyValueStore>, latency: Latency) -> Self {
        Self {
            users: Arc::new(UserRepository::new(backend.clone())),
            session: Arc::new(SessionStore::new(backend.clone())),
            jobs: Arc::new(JobRepository::new(backend.clone(), latency)),
            candidates: Arc::new(CandidateRepository::new(backend.clone(), latency)),
            backend,
            latency,
        }
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Restore jobs and candidates to their fixtures.
    ///
    /// Users and the session belong to the auth layer and are left alone.
    pub async fn reset_records(&self) -> StoreResult<()> {
        self.jobs.reset().await?;
        self.candidates.reset().await?;
        info!("Reset jobs and candidates to fixtures");
        Ok(())
    }

    /// Remove the job and candidate documents.
    pub async fn clear_records(&self) -> StoreResult<()> {
        self.jobs.clear().await?;
        self.candidates.clear().await?;
        info!("Cleared job and candidate documents");
        Ok(())
    }

    /// Check that the backend answers reads.
    pub async fn ping(&self) -> StoreResult<()> {
        self.backend.get(crate::fixtures::SESSION_KEY).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{CANDIDATES_KEY, JOBS_KEY, USERS_KEY};
    use std::time::Duration;

    #[tokio::test]
    async fn test_clear_records_removes_documents() {
        let store = HiringStore::in_memory();
        store.jobs.list().await.unwrap();
        store.candidates.list().await.unwrap();
        store.users.list().await.unwrap();

        store.clear_records().await.unwrap();

        for key in [JOBS_KEY, CANDIDATES_KEY] {
            assert!(store.backend().get(key).await.unwrap().is_none(), "{key}");
        }
        assert!(store.backend().get(USERS_KEY).await.unwrap().is_some());

        // next read seeds again
        assert_eq!(store.jobs.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_reset_records_restores_fixtures() {
        let store = HiringStore::in_memory();
        store.jobs.delete("job_20251001_0001").await.unwrap();
        assert_eq!(store.jobs.list().await.unwrap().len(), 2);

        store.reset_records().await.unwrap();
        assert_eq!(store.jobs.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_file_backed_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            data_dir: Some(dir.path().to_path_buf()),
            latency: Duration::ZERO,
        };

        let store = HiringStore::new(config.clone()).await.unwrap();
        store.jobs.delete("job_20250915_0003").await.unwrap();
        store.ping().await.unwrap();

        let reopened = HiringStore::new(config).await.unwrap();
        assert_eq!(reopened.jobs.list().await.unwrap().len(), 2);
    }
}
