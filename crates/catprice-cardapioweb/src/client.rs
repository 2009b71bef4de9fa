//! HTTP client for the CardapioWeb partner catalog endpoint.

use std::time::Duration;

use catprice_core::{AppConfig, CatalogRow, DistanceBand, OptionPolicy};
use reqwest::{Client, Url};

use crate::error::ClientError;
use crate::normalize::flatten_with_policy;
use crate::retry::retry_with_backoff;
use crate::types::RawCatalog;

/// Path of the catalog endpoint, relative to the partner API base URL.
pub const CATALOG_PATH: &str = "api/partner/v1/catalog";

const API_KEY_HEADER: &str = "X-API-KEY";

/// Client for the CardapioWeb partner API.
///
/// Every call fetches the catalog fresh; nothing is cached. Transient
/// failures (network errors, 429, 5xx) are retried with exponential back-off
/// up to `max_retries` additional attempts.
pub struct CardapioWebClient {
    client: Client,
    api_key: String,
    catalog_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl CardapioWebClient {
    /// Creates a client for the partner API at `base_url`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidBaseUrl`] if `base_url` is not an http(s) URL.
    /// - [`ClientError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ClientError> {
        let catalog_url = Self::catalog_url_for(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            catalog_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Creates a client from the partner and client settings of `config`.
    ///
    /// # Errors
    ///
    /// See [`CardapioWebClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.cardapioweb_base_url,
            &config.cardapioweb_api_key,
            config.client_timeout_secs,
            &config.client_user_agent,
            config.client_max_retries,
            config.client_backoff_base_ms,
        )
    }

    /// Full URL of the catalog endpoint.
    #[must_use]
    pub fn catalog_url(&self) -> &str {
        self.catalog_url.as_str()
    }

    pub(crate) fn catalog_url_for(base_url: &str) -> Result<Url, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };

        // One trailing slash so `join` appends instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", base.scheme())));
        }
        base.join(CATALOG_PATH).map_err(|e| invalid(e.to_string()))
    }

    /// Fetches the raw partner catalog.
    ///
    /// # Errors
    ///
    /// - [`ClientError::RateLimited`] on HTTP 429 after all retries.
    /// - [`ClientError::UnexpectedStatus`] on any other non-2xx status, carrying
    ///   the response body (5xx retried, 4xx not).
    /// - [`ClientError::Http`] on network or TLS failure after all retries.
    /// - [`ClientError::Deserialize`] if the body is not a catalog document.
    pub async fn fetch_catalog(&self) -> Result<RawCatalog, ClientError> {
        tracing::debug!(url = %self.catalog_url, "fetching CardapioWeb catalog");

        let catalog = retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .get(self.catalog_url.clone())
                .header(reqwest::header::ACCEPT, "application/json")
                .header(API_KEY_HEADER, &self.api_key)
                .send()
                .await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .unwrap_or(0);
                return Err(ClientError::RateLimited { retry_after_secs });
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ClientError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                });
            }

            let bytes = response.bytes().await?;
            serde_json::from_slice::<RawCatalog>(&bytes).map_err(|source| {
                ClientError::Deserialize {
                    context: "partner catalog".to_owned(),
                    source,
                }
            })
        })
        .await?;

        tracing::info!(
            categories = catalog.categories().len(),
            "fetched CardapioWeb catalog"
        );
        Ok(catalog)
    }

    /// Fetches the catalog and flattens it into priced rows for `band`.
    ///
    /// # Errors
    ///
    /// See [`CardapioWebClient::fetch_catalog`].
    pub async fn fetch_rows(
        &self,
        band: DistanceBand,
        policy: OptionPolicy,
    ) -> Result<Vec<CatalogRow>, ClientError> {
        let catalog = self.fetch_catalog().await?;
        Ok(flatten_with_policy(&catalog, band, policy))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
