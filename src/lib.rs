// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # MTG Harvest
//!
//! Fetches every card from the Magic: The Gathering card API while staying
//! inside its request quota, then sorts or filters the result.
//!
//! ## Features
//!
//! - **Bootstrap**: page 1 carries the page count (`Link` header) and the
//!   remaining quota (`Ratelimit-Remaining` header)
//! - **Throttled bursts**: at most `max_burst` page fetches per tick
//! - **Retry by requeue**: failed or faulted pages go back on the queue
//! - **Transforms**: sort by set, by set and rarity, or filter by set and colors
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mtg_harvest::fetcher::MtgClient;
//! use mtg_harvest::throttle::{SharedSink, Throttler};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> mtg_harvest::Result<()> {
//!     let client = MtgClient::with_defaults()?;
//!     let sink = SharedSink::new();
//!     let stats = Throttler::new(Arc::new(client), sink.clone()).run().await?;
//!
//!     println!("{} cards from {} pages", stats.records, stats.total_pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Throttler                           │
//! │  bootstrap() → page 1 + metadata     tick → burst of pages   │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌────────────┬─────────────────┼──────────────┬────────────────┐
//! │  Fetcher   │   Pagination    │   Queue      │   Sink         │
//! ├────────────┼─────────────────┼──────────────┼────────────────┤
//! │ /cards     │ Link rel=last   │ mpsc pages   │ Arc<Mutex<..>> │
//! │ HTTP quota │ Ratelimit-Rem.  │ requeue      │ cards          │
//! └────────────┴─────────────────┴──────────────┴────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Card model and post-processing transforms
pub mod card;

/// HTTP client with an optional quota guard
pub mod http;

/// Page numbers and pagination metadata
pub mod pagination;

/// Page fetchers
pub mod fetcher;

/// Burst scheduling, pending queue and shared sink
pub mod throttle;

/// Application configuration
pub mod config;

/// Card output rendering
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

pub use card::{Card, Transform};
pub use fetcher::{MtgClient, PageFetcher};
pub use throttle::{RunStats, SharedSink, ThrottleConfig, Throttler};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
