//! # Progress & Liveness
//!
//! Every successful location operation bumps a shared [`Progress`] counter.
//! The core never reads it; it exists so liveness can be checked from the
//! outside. [`Watchdog`] is such a check: it samples the counter and fails
//! with [`LivenessError::Stalled`] once it has not moved for longer than the
//! configured limit.
//!
//! A stall is what a full pipeline looks like: every slot in the loop holds a
//! cart and each engine waits on a location occupied by the next one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Monotonically increasing count of successful handoffs.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    count: Arc<AtomicU64>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LivenessError {
    #[error("No progress for {idle:?} (stuck at {count} handoffs)")]
    Stalled { idle: Duration, count: u64 },
}

/// Fails when the progress counter stops moving.
#[derive(Debug, Clone)]
pub struct Watchdog {
    progress: Progress,
    stall_limit: Duration,
    poll_interval: Duration,
}

impl Watchdog {
    pub fn new(progress: Progress, stall_limit: Duration) -> Self {
        Self {
            progress,
            stall_limit,
            poll_interval: Duration::from_millis(10),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Watches until `shutdown` is cancelled (`Ok`) or a stall is detected.
    pub async fn watch(&self, shutdown: CancellationToken) -> Result<(), LivenessError> {
        let mut last_count = self.progress.snapshot();
        let mut last_change = Instant::now();

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    debug!(count = last_count, "Watchdog stopped");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }

            let count = self.progress.snapshot();
            if count != last_count {
                last_count = count;
                last_change = Instant::now();
                continue;
            }

            let idle = last_change.elapsed();
            if idle > self.stall_limit {
                warn!(count, ?idle, "No progress, possible deadlock");
                return Err(LivenessError::Stalled { idle, count });
            }
        }
    }
}
