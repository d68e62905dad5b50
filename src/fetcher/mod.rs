//! Page fetcher module
//!
//! The capability the throttler drives: fetch one page of records, or fetch
//! the first page together with its pagination metadata.
//!
//! - `PageFetcher` - the trait the throttler is generic over
//! - `MtgClient` - implementation against the card API over HTTP

mod client;
mod types;

pub use client::{MtgClient, DEFAULT_BASE_URL};
pub use types::PageFetcher;
