//! Response header source.
//!
//! Issues one short GET against the application's own base URL and returns
//! the response headers with lower-cased names. Certificate validation is
//! disabled: self-signed certificates are common on the hosts being audited.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

use crate::value::{RawMap, RawValue};

/// Default timeout of the header probe.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// HTTP client capability used by the header source.
pub trait HeaderFetcher {
    /// Fetch `url` and return its response headers, names lower-cased.
    fn fetch(&self, url: &str) -> Result<RawMap>;
}

/// Fetches response headers over HTTP/HTTPS.
pub struct HttpHeaderFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpHeaderFetcher {
    /// Create a fetcher with the default 1-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent("confreport")
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl HeaderFetcher for HttpHeaderFetcher {
    fn fetch(&self, url: &str) -> Result<RawMap> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        let mut headers = RawMap::new();
        for name in response.headers().keys() {
            let joined = response
                .headers()
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(",");
            headers.insert(name.as_str().to_lowercase(), RawValue::from(joined));
        }

        Ok(headers)
    }
}

/// A header source with nothing to fetch from.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHeaders;

impl HeaderFetcher for NoHeaders {
    fn fetch(&self, url: &str) -> Result<RawMap> {
        bail!("no HTTP client configured for {}", url)
    }
}
