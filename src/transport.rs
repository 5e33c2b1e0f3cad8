//! HTTP transport layer.
//!
//! The transport is the crate's only extensibility seam: any type
//! implementing [`Transport`] can be injected at client construction,
//! which is how the test suite exercises every operation without network
//! access. The production implementation is [`HttpTransport`] over a
//! pooled [`reqwest::Client`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use paytr_client::transport::{HttpTransport, Transport};
//!
//! # async fn example() -> paytr_client::error::Result<()> {
//! let transport = HttpTransport::new()?;
//! let body = transport
//!     .post_json("https://www.paytr.com/odeme/durum-sorgu", b"{}")
//!     .await?;
//! println!("{} bytes", body.len());
//! # Ok(())
//! # }
//! ```

use std::{future::Future, time::Duration};

use tracing::instrument;
use url::Url;

use crate::error::{GatewayError, Result};

/// Default per-request timeout, applied uniformly to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport capability: accept a request, return a response or an error.
///
/// One method suffices: every gateway operation is an HTTPS POST with a
/// JSON body. Implementations issue a single attempt per call; there is
/// no retry, no backoff, and no queueing at this layer or above.
///
/// # Security
///
/// Implementations must require HTTPS; [`HttpTransport`] rejects non-HTTPS
/// URLs before sending.
pub trait Transport: Send + Sync {
    /// Issues a POST with `Content-Type: application/json` to `url` and
    /// returns the full response body.
    ///
    /// # Errors
    ///
    /// Returns error if request construction, network communication, or
    /// the body read fails.
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: &'a [u8],
    ) -> impl Future<Output = Result<Vec<u8>>> + Send + 'a;
}

/// Validates a target URL: must parse and must use HTTPS.
fn validate_url(url: &str) -> Result<Url> {
    let parsed =
        Url::parse(url).map_err(|e| GatewayError::InvalidUrl(format!("{url}: {e}")))?;
    if parsed.scheme() != "https" {
        return Err(GatewayError::InvalidUrl(format!("only HTTPS URLs are allowed: {url}")));
    }
    Ok(parsed)
}

/// HTTPS transport backed by a pooled [`reqwest::Client`].
///
/// One fixed timeout is configured at construction and applies uniformly
/// to every request; there is no per-call override.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with the default 10-second timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a transport with a custom uniform timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be constructed.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(timeout)
            .build()
            .map_err(GatewayError::Http)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    async fn post_json<'a>(&'a self, url: &'a str, body: &'a [u8]) -> Result<Vec<u8>> {
        let url = validate_url(url)?;

        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_vec())
            .send()
            .await?;

        let bytes = response.bytes().await.map_err(GatewayError::Http)?;
        Ok(bytes.to_vec())
    }
}
