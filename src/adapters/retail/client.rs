//! HTTP page source for the retail API
//!
//! [`RetailClient`] issues the page requests the collector asks for. It owns
//! everything transport-shaped: bearer authentication, TLS settings,
//! timeouts, status code mapping and retry with exponential backoff.

use super::source::{PageQuery, PageSource, ResourceKind};
use crate::config::{bearer_header, ApiConfig, RetryConfig, SecretString};
use crate::domain::{FetchError, LedgerError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;

/// User agent sent with every request
const USER_AGENT: &str = concat!("salesledger/", env!("CARGO_PKG_VERSION"));

/// Retail API client
///
/// # Example
///
/// ```no_run
/// use salesledger::adapters::retail::{PageQuery, PageSource, ResourceKind, RetailClient};
/// use salesledger::config::{secret_string, ApiConfig};
///
/// # async fn example() -> salesledger::domain::Result<()> {
/// let config = ApiConfig::new("mystore", secret_string("token".to_string()));
/// let client = RetailClient::new(&config)?;
///
/// let body = client
///     .fetch_page(ResourceKind::Sales, &PageQuery::after(1, 10_000))
///     .await?;
/// println!("{} bytes", body.len());
/// # Ok(())
/// # }
/// ```
pub struct RetailClient {
    /// Base URL without trailing slash
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Personal API token
    token: SecretString,

    /// Retry policy
    retry: RetryConfig,
}

impl RetailClient {
    /// Create a new client from API configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT);

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification is disabled for the retail API");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            LedgerError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url: config.resolved_base_url(),
            client,
            token: config.token.clone(),
            retry: config.retry.clone(),
        })
    }

    /// Full URL of a resource collection, without query string
    pub fn resource_url(&self, resource: ResourceKind) -> String {
        format!("{}/{}", self.base_url, resource.path())
    }

    /// Retry a request with exponential backoff
    ///
    /// Only errors that [`FetchError::is_retryable`] are retried.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> std::result::Result<T, FetchError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<T, FetchError>>,
    {
        let max_retries = self.retry.max_retries.max(1);
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries || !e.is_retryable() {
                        return Err(e);
                    }

                    let delay_ms = backoff_delay_ms(&self.retry, attempt);

                    tracing::warn!(
                        attempt = attempt,
                        max_retries = max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Retrying request after error"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }

    async fn get_once(
        &self,
        resource: ResourceKind,
        query: &PageQuery,
    ) -> std::result::Result<String, FetchError> {
        let url = self.resource_url(resource);

        tracing::debug!(url = %url, after = query.after, "Requesting page");

        let resp = self
            .client
            .get(&url)
            .query(&query.to_query_pairs())
            .header("Authorization", bearer_header(&self.token))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(e.to_string())
                } else {
                    FetchError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_error(resource, status, body));
        }

        resp.text()
            .await
            .map_err(|e| FetchError::ConnectionFailed(format!("Failed to read body: {e}")))
    }
}

#[async_trait]
impl PageSource for RetailClient {
    async fn fetch_page(
        &self,
        resource: ResourceKind,
        query: &PageQuery,
    ) -> std::result::Result<String, FetchError> {
        self.retry_request(|| self.get_once(resource, query)).await
    }
}

/// Delay before the retry following `attempt` failed attempts
fn backoff_delay_ms(retry: &RetryConfig, attempt: usize) -> u64 {
    let factor = retry
        .backoff_multiplier
        .powi(attempt.saturating_sub(1) as i32);
    let delay_ms = (retry.initial_delay_ms as f64 * factor) as u64;
    delay_ms.min(retry.max_delay_ms)
}

/// Map a non-success status to the matching [`FetchError`]
fn status_error(resource: ResourceKind, status: StatusCode, body: String) -> FetchError {
    let resource = resource.to_string();
    match status {
        StatusCode::UNAUTHORIZED => FetchError::Unauthorized { resource },
        StatusCode::NOT_FOUND => FetchError::NotFound { resource },
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited { resource },
        s if s.is_server_error() => FetchError::ServerError {
            status: s.as_u16(),
            message: body,
        },
        s => FetchError::ClientError {
            status: s.as_u16(),
            message: body,
        },
    }
}
