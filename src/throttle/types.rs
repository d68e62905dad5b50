//! Throttler types
//!
//! Configuration, per-page outcomes and run reporting.

use crate::error::{Error, Result};
use crate::pagination::PageNumber;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pages launched per tick unless configured otherwise
///
/// Well under the provider's 5000 requests per hour without adapting to
/// the quota headers.
pub const DEFAULT_MAX_BURST: usize = 3;

/// Default time between bursts
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for a throttled run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Maximum page fetches launched per tick
    pub max_burst: usize,
    /// Time between ticks
    #[serde(with = "duration_ms", rename = "tick_interval_ms")]
    pub tick_interval: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_burst: DEFAULT_MAX_BURST,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl ThrottleConfig {
    /// Create a new throttle config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the burst size
    #[must_use]
    pub fn with_max_burst(mut self, max_burst: usize) -> Self {
        self.max_burst = max_burst;
        self
    }

    /// Set the tick interval
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Reject settings that would never make progress
    pub fn validate(&self) -> Result<()> {
        if self.max_burst == 0 {
            return Err(Error::invalid_value("max_burst", "must be at least 1"));
        }
        if self.tick_interval.is_zero() {
            return Err(Error::invalid_value(
                "tick_interval_ms",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// What a single page task did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Records appended to the sink and the page counted
    Incorporated {
        /// The page
        page: PageNumber,
        /// Records the page contributed
        records: usize,
    },
    /// The page went back on the queue
    Requeued {
        /// The page
        page: PageNumber,
        /// Whether the fetch faulted rather than returning an error
        faulted: bool,
    },
}

impl PageOutcome {
    /// Page this outcome is about
    pub fn page(&self) -> PageNumber {
        match self {
            Self::Incorporated { page, .. } | Self::Requeued { page, .. } => *page,
        }
    }

    /// Check if the page was incorporated
    pub fn is_incorporated(&self) -> bool {
        matches!(self, Self::Incorporated { .. })
    }
}

/// Statistics from a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Pages in the source, from bootstrap
    pub total_pages: PageNumber,
    /// Quota reported at bootstrap
    pub remaining_quota: i64,
    /// Records incorporated, page 1 included
    pub records: usize,
    /// Ticks observed by the scheduler
    pub ticks: usize,
    /// Ticks that launched at least one task
    pub bursts: usize,
    /// Most tasks launched in one tick
    pub largest_burst: usize,
    /// Page failures that were requeued
    pub retries: usize,
    /// Requeues caused by a faulting fetch
    pub faults: usize,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

impl RunStats {
    /// Fold a task outcome into the stats
    pub fn record(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Incorporated { records, .. } => self.records += records,
            PageOutcome::Requeued { faulted, .. } => {
                self.retries += 1;
                if faulted {
                    self.faults += 1;
                }
            }
        }
    }

    /// Note a tick that launched `size` tasks
    pub fn add_burst(&mut self, size: usize) {
        self.ticks += 1;
        if size > 0 {
            self.bursts += 1;
        }
        self.largest_burst = self.largest_burst.max(size);
    }
}

/// Snapshot of where every page currently is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Pages in the source (0 before bootstrap)
    pub total_pages: PageNumber,
    /// Pages incorporated
    pub processed: PageNumber,
    /// Pages waiting in the queue
    pub pending: usize,
    /// Page tasks currently running
    pub in_flight: usize,
}

impl Progress {
    /// Pages accounted for by the counter, the queue and running tasks
    pub fn accounted(&self) -> usize {
        self.processed as usize + self.pending + self.in_flight
    }

    /// Check if every page has been incorporated
    pub fn is_complete(&self) -> bool {
        self.total_pages > 0 && self.processed == self.total_pages
    }
}
