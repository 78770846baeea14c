use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::error::AcquireError;

/// Production service root.
pub const SONGSTERR_BASE: &str = "https://www.songsterr.com";

/// The service rejects requests from obvious library default user agents.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client wrapper for the tab service.
///
/// Holds one `reqwest::Client` for the whole run and the service root all
/// API URLs are built against, so tests can point it at a local mock server.
pub struct Client {
    http: reqwest::Client,
    api_base: String,
}

impl Client {
    /// Build a client against the production service.
    pub fn new() -> Result<Self> {
        Self::with_api_base(SONGSTERR_BASE)
    }

    /// Build a client against an alternate service root.
    pub fn with_api_base(base: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_base: base.into(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// GET `url` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AcquireError> {
        self.get_json_query(url, &[]).await
    }

    /// GET `url` with query parameters and decode the JSON body.
    ///
    /// Network and non-2xx failures map to `Fetch`; a body that does not
    /// decode as `T` maps to `Resolution` (response not in expected shape).
    pub async fn get_json_query<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AcquireError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| AcquireError::fetch(url, source))?;

        tracing::debug!(url = %url, status = %response.status(), "GET");

        response
            .json::<T>()
            .await
            .map_err(|e| AcquireError::resolution(url, format!("unexpected response shape: {e}")))
    }

    /// GET `url` and return the status-checked response for streaming.
    pub async fn get(&self, url: &str) -> Result<reqwest::Response, AcquireError> {
        self.http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| AcquireError::fetch(url, source))
    }
}
