//! Throttled pagination module
//!
//! Fetches every page of a paginated source in timed, bounded bursts.
//!
//! # Overview
//!
//! - `Throttler` - bootstraps from page 1, then launches at most
//!   `max_burst` concurrent page fetches per tick until every page is in
//! - `PendingQueue` - bounded queue of pages awaiting a (re)fetch
//! - `SharedSink` - mutex-guarded accumulator the fetched records land in
//! - `ThrottleConfig`, `RunStats`, `Progress` - configuration and reporting
//!
//! A failed page, including one whose fetch panicked, goes back on the
//! queue and is retried on a later tick with no limit on attempts.

mod queue;
mod sink;
mod throttler;
mod types;

pub use queue::{PendingQueue, QueueHandle};
pub use sink::SharedSink;
pub use throttler::Throttler;
pub use types::{PageOutcome, Progress, RunStats, ThrottleConfig, DEFAULT_MAX_BURST};
