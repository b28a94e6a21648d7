//! Store configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default artificial delay applied to data operations.
pub const DEFAULT_LATENCY_MS: u64 = 300;

/// Configuration for the hiring store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory for the file backend. `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    /// Artificial delay applied before each data operation.
    pub latency: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
        }
    }
}

impl StoreConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            latency: Duration::from_millis(
                std::env::var("SIMULATED_LATENCY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_LATENCY_MS),
            ),
        }
    }
}

/// Simulated network latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latency(Duration);

impl Latency {
    pub fn new(delay: Duration) -> Self {
        Self(delay)
    }

    pub fn none() -> Self {
        Self(Duration::ZERO)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    /// Sleep for the configured delay.
    pub async fn simulate(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}
