use super::cache::RecordCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Periodic cache sweep. Read-triggered cleanup only reaps keys somebody
/// still asks for; this job walks the whole map so idle keys age out too.
pub struct CacheMaintenance {
    cache: Arc<RecordCache>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl CacheMaintenance {
    pub fn new(cache: Arc<RecordCache>) -> Self {
        Self {
            cache,
            interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn spawn(self) -> JoinHandle<()> {
        info!(interval_secs = self.interval.as_secs(), "starting cache maintenance");
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            // The first tick fires immediately; skip it so a fresh cache
            // is not swept at startup.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("cache maintenance: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let swept = self.cache.sweep_expired();
                        if swept > 0 {
                            debug!(swept, keys = self.cache.len(), "cache sweep complete");
                        }
                    }
                }
            }
        })
    }
}
