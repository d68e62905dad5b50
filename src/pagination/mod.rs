//! Pagination module
//!
//! Page numbering and the one-shot metadata read from the first page's
//! response headers.
//!
//! # Overview
//!
//! The card API paginates with a `page` query parameter and advertises the
//! page range through an RFC 5988 `Link` header. Only the first response is
//! inspected: the `last` relation gives the total page count and the
//! `Ratelimit-Remaining` header the quota left for the current window.

mod link;
mod types;

pub use link::{last_page_from_link, metadata_from_headers, parse_link_header};
pub use types::{PageNumber, PaginationMetadata, FIRST_PAGE, PAGE_PARAM};
