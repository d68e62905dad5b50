//! Pagination types

use serde::Serialize;

/// One unit of remote work. Pages are numbered from 1.
pub type PageNumber = u32;

/// The page fetched during bootstrap
pub const FIRST_PAGE: PageNumber = 1;

/// Query parameter carrying the page number
pub const PAGE_PARAM: &str = "page";

/// Pagination metadata gathered once, from the first page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMetadata {
    /// Total number of pages, at least 1
    pub total_pages: PageNumber,
    /// Requests left in the provider's current quota window
    pub remaining_quota: i64,
}

impl PaginationMetadata {
    /// Create metadata, clamping the page count to at least one page
    pub fn new(total_pages: PageNumber, remaining_quota: i64) -> Self {
        Self {
            total_pages: total_pages.max(FIRST_PAGE),
            remaining_quota,
        }
    }

    /// Pages left after the first one
    pub fn remaining_pages(&self) -> u32 {
        self.total_pages - FIRST_PAGE
    }

    /// Iterate the page numbers fetched after bootstrap
    pub fn pages_after_first(&self) -> impl Iterator<Item = PageNumber> {
        (FIRST_PAGE + 1)..=self.total_pages
    }
}
