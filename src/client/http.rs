//! Blocking HTTP transport.
//!
//! Certificate validation is switched off by default
//! (`accept_invalid_certs = true`): the catalog has historically been reached
//! through hosts whose certificate chain does not validate. This means a
//! network attacker can impersonate the backend. Set
//! `http.accept_invalid_certs = false` in the config to restore validation.

use super::{SearchPage, SearchResponse, SearchTransport};
use crate::models::QueryString;
use crate::{Error, Result};
use std::time::Duration;

/// HTTP client configuration for catalog requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
    /// Skip TLS certificate validation.
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 3_000,
            accept_invalid_certs: true,
        }
    }
}

impl HttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("JOURNAL_SEARCH_TIMEOUT_MS") {
            if let Ok(timeout_ms) = v.parse::<u64>() {
                self.timeout_ms = timeout_ms;
            }
        }
        if let Ok(v) = std::env::var("JOURNAL_SEARCH_CONNECT_TIMEOUT_MS") {
            if let Ok(connect_timeout_ms) = v.parse::<u64>() {
                self.connect_timeout_ms = connect_timeout_ms;
            }
        }
        self
    }
}

/// Builds a blocking HTTP client with configured timeouts.
#[must_use]
pub fn build_http_client(config: HttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder()
        .user_agent(concat!("journal-search/", env!("CARGO_PKG_VERSION")))
        .danger_accept_invalid_certs(config.accept_invalid_certs);
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build catalog HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}

/// Catalog transport over blocking HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// API base URL, without trailing slash.
    endpoint: String,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://inspirehep.net/api";

    /// Creates a transport for the default endpoint.
    #[must_use]
    pub fn new(config: HttpConfig) -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            client: build_http_client(config),
        }
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// The API endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends a request and decodes the page.
    fn get(&self, request: reqwest::blocking::RequestBuilder, operation: &str) -> Result<SearchPage> {
        let response = request.send().map_err(|e| {
            let error_kind = if e.is_timeout() {
                "timeout"
            } else if e.is_connect() {
                "connect"
            } else if e.is_request() {
                "request"
            } else {
                "unknown"
            };
            tracing::error!(
                endpoint = %self.endpoint,
                error = %e,
                error_kind = error_kind,
                is_timeout = e.is_timeout(),
                is_connect = e.is_connect(),
                "Catalog request failed"
            );
            Error::Transport {
                operation: operation.to_string(),
                cause: format!("{error_kind} error: {e}"),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            tracing::error!(url = %url, status = %status, "Catalog returned error status");
            return Err(Error::BackendRequest {
                url,
                status: status.as_u16(),
            });
        }

        let body: SearchResponse = response.json().map_err(|e| {
            tracing::error!(endpoint = %self.endpoint, error = %e, "Failed to parse catalog response");
            Error::Transport {
                operation: format!("{operation}_response"),
                cause: e.to_string(),
            }
        })?;

        Ok(body.into())
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(HttpConfig::from_env())
    }
}

impl SearchTransport for HttpTransport {
    fn search(&self, collection: &str, query: &QueryString) -> Result<SearchPage> {
        let url = format!("{}/{collection}", self.endpoint);
        tracing::debug!(url = %url, query = %query, "Searching catalog");
        self.get(
            self.client.get(url).query(&[("q", query.as_str())]),
            "catalog_search",
        )
    }

    fn follow(&self, next: &str) -> Result<SearchPage> {
        tracing::debug!(url = %next, "Following next page link");
        self.get(self.client.get(next), "catalog_next_page")
    }

    fn describe_search(&self, collection: &str, query: &QueryString) -> String {
        format!("{}/{collection}?q={query}", self.endpoint)
    }
}
