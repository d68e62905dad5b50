//! HTTP client module
//!
//! Thin wrapper over reqwest used by the card fetcher.
//!
//! # Features
//!
//! - **Base URL joining**: requests take paths relative to the API root
//! - **Status classification**: non-2xx responses become `Error::HttpStatus`
//! - **Quota guard**: optional fixed token bucket using governor

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
