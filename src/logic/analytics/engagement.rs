//! Session Timers
//!
//! One-shot engagement events at fixed elapsed-time thresholds since the
//! shell started. Flags live for the whole session: unlike scroll depth
//! they are never reset on view changes.

use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use crate::constants::ENGAGEMENT_POLL_INTERVAL;

use super::emitter::Emitter;

/// Elapsed-time checkpoints (seconds)
pub const ENGAGEMENT_THRESHOLDS: [u64; 3] = [30, 60, 180];

// ============================================================================
// TIMERS
// ============================================================================

/// One-shot flags per elapsed-time threshold
#[derive(Debug, Default)]
pub struct EngagementTimers {
    fired: [bool; ENGAGEMENT_THRESHOLDS.len()],
}

impl EngagementTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `engagement_<N>s` for every threshold the elapsed time has
    /// crossed and that has not fired yet. Each fires at most once per
    /// tracker lifetime.
    pub fn check(&mut self, elapsed: Duration, emitter: &Emitter) {
        let elapsed_secs = elapsed.as_secs();

        for (i, &threshold) in ENGAGEMENT_THRESHOLDS.iter().enumerate() {
            if elapsed_secs >= threshold && !self.fired[i] {
                self.fired[i] = true;
                emitter.emit_simple(&format!("engagement_{}s", threshold));
            }
        }
    }

    /// All thresholds have fired; polling further is pointless
    pub fn complete(&self) -> bool {
        self.fired.iter().all(|&f| f)
    }
}

// ============================================================================
// POLLER
// ============================================================================

/// Handle to the background engagement poller
pub struct EngagementHandle {
    task: JoinHandle<()>,
}

impl EngagementHandle {
    /// Stop the poller
    pub fn cancel(self) {
        self.task.abort();
    }
}

/// Start the engagement poller for the lifetime of the application shell.
///
/// Polls every `ENGAGEMENT_POLL_INTERVAL` seconds, so reported elapsed time
/// carries up to that much jitter against the actual thresholds.
pub fn start_engagement_tracking(emitter: Emitter) -> EngagementHandle {
    let start = Instant::now();

    let task = tokio::spawn(async move {
        let mut timers = EngagementTimers::new();
        let mut interval =
            tokio::time::interval(Duration::from_secs(ENGAGEMENT_POLL_INTERVAL));
        // First tick resolves immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            timers.check(start.elapsed(), &emitter);
            if timers.complete() {
                break;
            }
        }
    });

    EngagementHandle { task }
}

// ============================================================================
// TESTS
// ============================================================================
