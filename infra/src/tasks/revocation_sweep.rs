//! Periodic sweep of the revocation list
//!
//! Deletes entries whose revocation window has closed so the table only
//! grows with active logouts. Failures are logged and the task keeps going.

use std::sync::Arc;
use std::time::Duration;

use sg_core::repositories::RevocationRepository;
use sg_core::services::RevocationService;
use sg_shared::config::RevocationConfig;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Configuration for the revocation sweeper
#[derive(Debug, Clone)]
pub struct RevocationSweepConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic sweeping
    pub enabled: bool,
}

impl Default for RevocationSweepConfig {
    fn default() -> Self {
        Self::from(&RevocationConfig::default())
    }
}

impl From<&RevocationConfig> for RevocationSweepConfig {
    fn from(config: &RevocationConfig) -> Self {
        Self {
            interval_seconds: config.sweep_interval_seconds.max(1),
            enabled: config.sweep_enabled,
        }
    }
}

/// Outcome of one sweep cycle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of closed revocation entries deleted
    pub entries_deleted: usize,
    /// Error encountered during the sweep, if any
    pub error: Option<String>,
}

impl SweepResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs `RevocationService::sweep` on a fixed interval
pub struct RevocationSweeper<R: RevocationRepository + 'static> {
    revocations: Arc<RevocationService<R>>,
    config: RevocationSweepConfig,
}

impl<R: RevocationRepository + 'static> RevocationSweeper<R> {
    pub fn new(revocations: Arc<RevocationService<R>>, config: RevocationSweepConfig) -> Self {
        Self {
            revocations,
            config,
        }
    }

    /// Run a single sweep cycle
    pub async fn run_once(&self) -> SweepResult {
        match self.revocations.sweep().await {
            Ok(count) => {
                info!("Revocation sweep deleted {} expired entries", count);
                SweepResult {
                    entries_deleted: count,
                    error: None,
                }
            }
            Err(e) => {
                error!("Revocation sweep failed: {}", e);
                SweepResult {
                    entries_deleted: 0,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when sweeping is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Revocation sweep is disabled");
            return None;
        }

        let interval = Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "Revocation sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;
                self.run_once().await;
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use sg_core::domain::clock::{Clock, ManualClock};
    use sg_core::repositories::InMemoryRevocationRepository;

    type Fixture = (
        Arc<RevocationSweeper<InMemoryRevocationRepository>>,
        Arc<RevocationService<InMemoryRevocationRepository>>,
        Arc<InMemoryRevocationRepository>,
        ManualClock,
    );

    fn sweeper(config: RevocationSweepConfig) -> Fixture {
        let repo = Arc::new(InMemoryRevocationRepository::new());
        let clock = ManualClock::default();
        let revocations = Arc::new(RevocationService::new(repo.clone(), Arc::new(clock.clone())));
        let sweeper = Arc::new(RevocationSweeper::new(revocations.clone(), config));
        (sweeper, revocations, repo, clock)
    }

    #[tokio::test]
    async fn test_run_once_reports_deleted_entries() {
        let (sweeper, revocations, repo, clock) = sweeper(RevocationSweepConfig::default());
        revocations
            .revoke("a", clock.now() + ChronoDuration::minutes(5))
            .await
            .unwrap();
        revocations
            .revoke("b", clock.now() + ChronoDuration::minutes(60))
            .await
            .unwrap();

        clock.advance(ChronoDuration::minutes(10));
        let result = sweeper.run_once().await;

        assert!(result.is_success());
        assert_eq!(result.entries_deleted, 1);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_disabled_sweeper_does_not_start() {
        let config = RevocationSweepConfig {
            interval_seconds: 1,
            enabled: false,
        };
        let (sweeper, _, _, _) = sweeper(config);

        assert!(sweeper.start_background_task().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_task_sweeps_on_interval() {
        let config = RevocationSweepConfig {
            interval_seconds: 60,
            enabled: true,
        };
        let (sweeper, revocations, repo, clock) = sweeper(config);
        revocations
            .revoke("a", clock.now() + ChronoDuration::minutes(5))
            .await
            .unwrap();
        clock.advance(ChronoDuration::minutes(10));

        let handle = sweeper.start_background_task().unwrap();
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert!(repo.is_empty().await);
        handle.abort();
    }

    #[test]
    fn test_config_from_revocation_config() {
        let config = RevocationConfig {
            sweep_enabled: false,
            sweep_interval_seconds: 0,
            ..RevocationConfig::default()
        };

        let sweep = RevocationSweepConfig::from(&config);

        assert!(!sweep.enabled);
        assert_eq!(sweep.interval_seconds, 1);
        assert_eq!(RevocationSweepConfig::default().interval_seconds, 600);
    }
}
