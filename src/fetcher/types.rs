//! Fetcher trait

use crate::error::Result;
use crate::pagination::{PageNumber, PaginationMetadata};
use async_trait::async_trait;

/// Retrieves pages of records from a paginated source
///
/// Both calls may fail with ordinary errors; deciding which failures are
/// fatal is up to the caller.
#[async_trait]
pub trait PageFetcher: Send + Sync + 'static {
    /// Record type carried by each page
    type Record: Send + 'static;

    /// Fetch the records on `page`
    async fn fetch_page(&self, page: PageNumber) -> Result<Vec<Self::Record>>;

    /// Fetch page 1 together with the pagination metadata
    async fn fetch_first_page_with_metadata(
        &self,
    ) -> Result<(Vec<Self::Record>, PaginationMetadata)>;
}
