//! HTTP client for the Fluent Bit monitoring API.
//!
//! Every call is a single blocking round trip with no caching and no retry;
//! retry policy belongs to the poll driver.

mod model;

pub use model::{BuildInfo, FluentBitInfo, MetricInput, MetricOutput, Metrics, Uptime};

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::util::parse_origin;

/// Fixed endpoints served by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    BuildInfo,
    Uptime,
    Metrics,
}

impl Endpoint {
    /// Request path relative to the configured origin.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::BuildInfo => "/",
            Endpoint::Uptime => "/api/v1/uptime",
            Endpoint::Metrics => "/api/v1/metrics",
        }
    }
}

/// Errors reported by a single fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be built (malformed origin or path).
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Connection failure or deadline expiry.
    #[error("request to {path} failed: {source}")]
    Transport {
        path: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The agent answered with a status code >= 400.
    #[error("request to {path} failed with status code {code}")]
    Status { path: &'static str, code: u16 },

    /// The body does not match the expected payload.
    #[error("could not decode response from {path}: {source}")]
    Decode {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Returns `true` if the request hit its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport { source, .. } if source.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Client bound to one agent origin.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::blocking::Client,
    base_url: Url,
}

impl Client {
    /// Creates a client for `origin` (e.g. `http://localhost:2020`).
    ///
    /// `timeout` bounds every request made by this client.
    pub fn new(origin: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_origin(origin).map_err(|e| FetchError::InvalidAddress(e.to_string()))?;
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("fbtop/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::InvalidAddress(format!("could not create HTTP client: {e}")))?;
        Ok(Self { http, base_url })
    }

    /// The origin this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn build_info(&self) -> Result<BuildInfo> {
        self.fetch_json(Endpoint::BuildInfo, None)
    }

    pub fn uptime(&self) -> Result<Uptime> {
        self.fetch_json(Endpoint::Uptime, None)
    }

    pub fn metrics(&self) -> Result<Metrics> {
        self.fetch_json(Endpoint::Metrics, None)
    }

    /// Fetches `endpoint` with `timeout` instead of the client-wide one.
    pub fn get<T: DeserializeOwned>(&self, endpoint: Endpoint, timeout: Duration) -> Result<T> {
        self.fetch_json(endpoint, Some(timeout))
    }

    fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        timeout: Option<Duration>,
    ) -> Result<T> {
        let path = endpoint.path();
        let url = self
            .base_url
            .join(path)
            .map_err(|e| FetchError::InvalidAddress(format!("{}{}: {}", self.base_url, path, e)))?;

        debug!(url = %url, ?timeout, "fetching");
        let mut request = self.http.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .map_err(|source| FetchError::Transport { path, source })?;

        // Anything from 400 up is an error, including non-standard codes.
        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(FetchError::Status {
                path,
                code: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .map_err(|source| FetchError::Transport { path, source })?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { path, source })
    }
}
