//! Link and quota header parsing

use super::types::{PageNumber, PaginationMetadata, FIRST_PAGE, PAGE_PARAM};
use crate::error::{Error, Result};
use reqwest::header::HeaderMap;
use url::Url;

/// Header carrying the remaining request quota
pub const RATELIMIT_REMAINING_HEADER: &str = "ratelimit-remaining";

/// Parse a Link header and extract the URL for the given rel
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    // Link header format: <url>; rel="next", <url>; rel="last"
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            if r == target_rel {
                return Some(u.to_string());
            }
        }
    }

    None
}

/// Extract the total page count from the `last` relation of a Link header
pub fn last_page_from_link(header: &str) -> Result<PageNumber> {
    let last = parse_link_header(header, "last")
        .ok_or_else(|| Error::metadata(format!("no rel=\"last\" link in '{header}'")))?;

    let url = Url::parse(&last)?;
    let page = url
        .query_pairs()
        .find(|(key, _)| key == PAGE_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| Error::metadata(format!("last link '{last}' has no page parameter")))?;

    page.parse::<PageNumber>()
        .map_err(|e| Error::metadata(format!("could not extract total pages from '{page}': {e}")))
}

/// Build pagination metadata from the first page's response headers
///
/// A response without a Link header is a single page. A Link header that
/// exists but has no usable `last` relation is an error, as is a missing
/// or non-numeric quota header.
pub fn metadata_from_headers(headers: &HeaderMap) -> Result<PaginationMetadata> {
    let total_pages = match headers.get(reqwest::header::LINK) {
        Some(value) => {
            let link = value
                .to_str()
                .map_err(|e| Error::metadata(format!("unreadable Link header: {e}")))?;
            last_page_from_link(link)?
        }
        None => FIRST_PAGE,
    };

    let remaining_quota = headers
        .get(RATELIMIT_REMAINING_HEADER)
        .ok_or_else(|| Error::metadata("missing Ratelimit-Remaining header"))?
        .to_str()
        .map_err(|e| Error::metadata(format!("unreadable Ratelimit-Remaining header: {e}")))?
        .trim()
        .parse::<i64>()
        .map_err(|e| Error::metadata(format!("could not extract rate limit from headers: {e}")))?;

    Ok(PaginationMetadata::new(total_pages, remaining_quota))
}
