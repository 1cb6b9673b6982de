//! Page retrieval over HTTP.
//!
//! Extraction strategies only fetch through the [`FetchPage`] trait; tests
//! swap in a fetcher that serves fixed bodies.

use crate::config::Settings;
use crate::error::Result;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::fmt;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Trait for fetching a single page body.
pub trait FetchPage {
    /// GET `url` and return the response body.
    ///
    /// A non-success status is an error. When `user_agent` is given it is
    /// sent as the `User-Agent` header.
    async fn fetch(&self, url: &str, user_agent: Option<&str>) -> Result<Vec<u8>>;
}

/// [`FetchPage`] backed by a `reqwest` client with a fixed timeout.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder().timeout(settings.timeout()).build()?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str, user_agent: Option<&str>) -> Result<Vec<u8>> {
        let mut request = self.client.get(url);
        if let Some(agent) = user_agent {
            request = request.header(USER_AGENT, agent);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher").finish_non_exhaustive()
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str, user_agent: Option<&str>) -> Result<Vec<u8>> {
        let t0 = Instant::now();
        let res = self.get(url, user_agent).await;
        let dt = t0.elapsed();
        match &res {
            Ok(body) => debug!(elapsed_ms = dt.as_millis() as u64, bytes = body.len(), "Fetched page"),
            Err(e) => warn!(elapsed_ms = dt.as_millis() as u64, error = %e, "Fetch failed"),
        }
        res
    }
}
