//! Timer-driven burst scheduler
//!
//! A run has two phases:
//!
//! 1. **Bootstrap** - page 1 is fetched with its metadata, its records go
//!    straight into the sink and pages `2..=total` are queued. A failure here
//!    ends the run with `Error::Bootstrap`.
//! 2. **Bursts** - every tick, starting one interval after bootstrap, up to
//!    `max_burst` pages are taken off the queue and fetched concurrently. Failed pages are requeued. The loop
//!    stops once the processed counter reaches the page total, and the run
//!    returns after every launched task has finished.

use super::queue::{PendingQueue, QueueHandle};
use super::sink::SharedSink;
use super::types::{PageOutcome, Progress, RunStats, ThrottleConfig};
use crate::error::{Error, Result};
use crate::fetcher::PageFetcher;
use crate::pagination::{PageNumber, FIRST_PAGE};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Counters shared by the scheduler and its page tasks
#[derive(Debug, Default)]
struct RunState {
    total_pages: AtomicU32,
    processed: AtomicU32,
    in_flight: AtomicUsize,
    queue: RwLock<Option<QueueHandle>>,
}

impl RunState {
    fn is_done(&self) -> bool {
        self.processed.load(Ordering::Acquire) == self.total_pages.load(Ordering::Acquire)
    }
}

/// Counts a page task as in flight until dropped
struct InFlight(Arc<RunState>);

impl InFlight {
    fn enter(state: &Arc<RunState>) -> Self {
        state.in_flight.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(state))
    }

    fn mark_processed(&self) {
        self.0.processed.fetch_add(1, Ordering::AcqRel);
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Fetches every page of a source in throttled bursts
///
/// # Example
///
/// ```rust,ignore
/// let sink = SharedSink::new();
/// let throttler = Throttler::new(Arc::new(client), sink.clone());
/// let stats = throttler.run().await?;
/// let cards = sink.take().await;
/// ```
pub struct Throttler<F: PageFetcher> {
    fetcher: Arc<F>,
    sink: SharedSink<F::Record>,
    config: ThrottleConfig,
    state: Arc<RunState>,
}

impl<F: PageFetcher> Throttler<F> {
    /// Create a throttler writing into `sink`
    pub fn new(fetcher: Arc<F>, sink: SharedSink<F::Record>) -> Self {
        Self {
            fetcher,
            sink,
            config: ThrottleConfig::default(),
            state: Arc::new(RunState::default()),
        }
    }

    /// Set throttle configuration
    #[must_use]
    pub fn with_config(mut self, config: ThrottleConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the throttle configuration
    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// Get the sink records are written to
    pub fn sink(&self) -> &SharedSink<F::Record> {
        &self.sink
    }

    /// Where every page of the current run stands
    pub async fn progress(&self) -> Progress {
        let pending = self
            .state
            .queue
            .read()
            .await
            .as_ref()
            .map_or(0, QueueHandle::len);

        Progress {
            total_pages: self.state.total_pages.load(Ordering::Acquire),
            processed: self.state.processed.load(Ordering::Acquire),
            pending,
            in_flight: self.state.in_flight.load(Ordering::Acquire),
        }
    }

    /// Fetch every page into the sink
    ///
    /// Resolves only once all pages are incorporated. Page failures are
    /// retried without limit, so a page that never succeeds keeps this
    /// future pending forever. The only error is a failed bootstrap.
    pub async fn run(&self) -> Result<RunStats> {
        self.config.validate()?;
        let start = Instant::now();

        let (mut queue, mut stats) = self.bootstrap().await?;

        // Burst k fires k intervals after bootstrap
        let tick = self.config.tick_interval;
        let mut ticker = interval_at(Instant::now() + tick, tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut tasks = JoinSet::new();

        loop {
            if self.state.is_done() {
                info!("All pages have been processed");
                break;
            }

            ticker.tick().await;

            let burst = queue.len().min(self.config.max_burst);
            let mut launched = 0;
            for _ in 0..burst {
                let Some(page) = queue.try_dequeue() else {
                    break;
                };
                let task = PageTask {
                    page,
                    fetcher: Arc::clone(&self.fetcher),
                    sink: self.sink.clone(),
                    queue: queue.handle(),
                    in_flight: InFlight::enter(&self.state),
                };
                tasks.spawn(task.run());
                launched += 1;
            }
            stats.add_burst(launched);

            if launched > 0 {
                debug!(launched, pending = queue.len(), "Burst launched");
            }

            while let Some(joined) = tasks.try_join_next() {
                reap(joined, &mut stats);
            }
        }

        while let Some(joined) = tasks.join_next().await {
            reap(joined, &mut stats);
        }

        *self.state.queue.write().await = None;
        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            pages = stats.total_pages,
            records = stats.records,
            retries = stats.retries,
            faults = stats.faults,
            duration_ms = stats.duration_ms,
            "Harvest complete"
        );

        Ok(stats)
    }

    /// Fetch page 1 with metadata, seed the sink and fill the queue
    async fn bootstrap(&self) -> Result<(PendingQueue, RunStats)> {
        self.state.total_pages.store(0, Ordering::Release);
        self.state.processed.store(0, Ordering::Release);
        *self.state.queue.write().await = None;

        info!("Gathering pagination metadata");

        let (records, metadata) = match self.fetcher.fetch_first_page_with_metadata().await {
            Ok(first) => first,
            Err(e) => {
                debug!(error = %e, "Could not gather pagination metadata");
                return Err(Error::bootstrap(e));
            }
        };

        info!(
            total_pages = metadata.total_pages,
            remaining_quota = metadata.remaining_quota,
            "Pagination metadata gathered"
        );
        if metadata.remaining_quota < i64::from(metadata.total_pages) {
            warn!(
                remaining_quota = metadata.remaining_quota,
                total_pages = metadata.total_pages,
                "Remaining quota is below the page count"
            );
        }

        let queue = PendingQueue::with_capacity(metadata.remaining_pages() as usize);
        let stats = RunStats {
            total_pages: metadata.total_pages,
            remaining_quota: metadata.remaining_quota,
            records: records.len(),
            ..RunStats::default()
        };
        self.sink.extend(records).await;

        for page in metadata.pages_after_first() {
            if let Err(e) = queue.enqueue(page) {
                // Unreachable with a fresh queue sized to the page range
                error!(page, error = %e, "Could not queue page");
                return Err(Error::bootstrap(e));
            }
        }
        *self.state.queue.write().await = Some(queue.handle());

        // Published last so progress never shows a half-seeded run
        self.state.in_flight.store(0, Ordering::Release);
        self.state.processed.store(FIRST_PAGE, Ordering::Release);
        self.state
            .total_pages
            .store(metadata.total_pages, Ordering::Release);

        Ok((queue, stats))
    }
}

/// One fetch-and-incorporate attempt for a single page
struct PageTask<F: PageFetcher> {
    page: PageNumber,
    fetcher: Arc<F>,
    sink: SharedSink<F::Record>,
    queue: QueueHandle,
    in_flight: InFlight,
}

impl<F: PageFetcher> PageTask<F> {
    /// Either incorporates the page and counts it, or requeues it
    async fn run(self) -> PageOutcome {
        let page = self.page;
        debug!(page, "Processing page");

        let fetched = AssertUnwindSafe(self.fetcher.fetch_page(page))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(Error::task_fault(page, panic_message(panic.as_ref()))));

        match fetched {
            Ok(records) => {
                let count = records.len();
                self.sink.extend(records).await;
                self.in_flight.mark_processed();
                PageOutcome::Incorporated {
                    page,
                    records: count,
                }
            }
            Err(e) => {
                let faulted = matches!(e, Error::TaskFault { .. });
                if faulted {
                    warn!(page, error = %e, "Recovered from faulted page task, requeueing");
                } else if e.is_retryable() {
                    warn!(page, error = %e, "Page fetch failed, requeueing");
                } else {
                    error!(page, error = %e, "Page fetch failed, requeueing");
                }
                if let Err(e) = self.queue.requeue(page).await {
                    error!(page, error = %e, "Could not requeue page");
                }
                PageOutcome::Requeued { page, faulted }
            }
        }
    }
}

fn reap(joined: std::result::Result<PageOutcome, JoinError>, stats: &mut RunStats) {
    match joined {
        Ok(outcome) => stats.record(outcome),
        Err(e) => error!(error = %e, "Page task ended abnormally"),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
