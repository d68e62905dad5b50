//! Card API client

use super::types::PageFetcher;
use crate::card::{decode_cards, Card};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{
    metadata_from_headers, PageNumber, PaginationMetadata, FIRST_PAGE, PAGE_PARAM,
};
use async_trait::async_trait;
use reqwest::Response;
use serde_json::Value;
use tracing::debug;

/// Root of the public card API
pub const DEFAULT_BASE_URL: &str = "https://api.magicthegathering.io/v1";

const CARDS_PATH: &str = "/cards";

/// Fetches card pages from `{base_url}/cards?page=N`
#[derive(Debug, Clone)]
pub struct MtgClient {
    http: HttpClient,
}

impl MtgClient {
    /// Create a client over a configured HTTP client
    ///
    /// The HTTP client's base URL should point at the API root.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Create a client for the public card API with default settings
    pub fn with_defaults() -> Result<Self> {
        let config = HttpClientConfig::builder()
            .base_url(DEFAULT_BASE_URL)
            .build();
        Ok(Self::new(HttpClient::with_config(config)?))
    }

    /// Resolved URL of the cards endpoint
    pub fn cards_url(&self) -> String {
        self.http.build_url(CARDS_PATH)
    }

    async fn get_page(&self, page: PageNumber) -> Result<Response> {
        debug!(page, "Requesting card page");
        self.http
            .get_with_config(
                &self.cards_url(),
                RequestConfig::new().query(PAGE_PARAM, page.to_string()),
            )
            .await
            .map_err(server_error)
    }
}

#[async_trait]
impl PageFetcher for MtgClient {
    type Record = Card;

    async fn fetch_page(&self, page: PageNumber) -> Result<Vec<Card>> {
        let response = self.get_page(page).await?;
        let body = response.text().await?;
        decode_cards(&body)
    }

    async fn fetch_first_page_with_metadata(&self) -> Result<(Vec<Card>, PaginationMetadata)> {
        let response = self.get_page(FIRST_PAGE).await?;
        let metadata = metadata_from_headers(response.headers())?;
        let body = response.text().await?;
        let cards = decode_cards(&body)?;
        Ok((cards, metadata))
    }
}

/// Replace an error status body with the server's message when it sends one
///
/// The API answers failures with either a bare JSON string or an
/// `{"error": "..."}` object.
fn server_error(err: Error) -> Error {
    match err {
        Error::HttpStatus { status, body } => {
            let message = match serde_json::from_str::<Value>(&body) {
                Ok(Value::String(message)) => message,
                Ok(Value::Object(map)) => match map.get("error") {
                    Some(Value::String(message)) => message.clone(),
                    _ => body,
                },
                _ => body,
            };
            Error::http_status(status, message)
        }
        other => other,
    }
}
