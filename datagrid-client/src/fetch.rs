//! Fetching grid fragments over HTTP

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::error::ApiError;

/// Header marking the request as issued by script rather than navigation.
const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Retrieves the HTML body behind a URL.
///
/// Sessions talk to the server only through this trait, so they can be
/// driven by canned responses in tests.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and return the response body.
    async fn fetch(&self, url: &Url) -> Result<String, ApiError>;
}

/// [`Fetcher`] backed by a `reqwest` client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpFetcher {
    inner: Arc<HttpFetcherInner>,
}

struct HttpFetcherInner {
    http_client: Client,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    /// Creates a fetcher with default settings.
    pub fn new() -> Result<Self, ApiError> {
        Self::builder().build()
    }

    /// Creates a new builder for constructing a fetcher.
    pub fn builder() -> HttpFetcherBuilder {
        HttpFetcherBuilder::default()
    }

    /// Returns the per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, ApiError> {
        debug!("GET {url}");
        let mut request = self
            .inner
            .http_client
            .get(url.as_str())
            .header(REQUESTED_WITH.0, REQUESTED_WITH.1);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::http(status.as_u16(), body))
        }
    }
}

impl HttpFetcher {
    fn classify(&self, err: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(err),
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for constructing an [`HttpFetcher`].
///
/// # Example
///
/// ```ignore
/// let fetcher = HttpFetcher::builder()
///     .timeout(Duration::from_secs(30))
///     .connect_timeout(Duration::from_secs(5))
///     .build()?;
/// ```
#[derive(Default)]
pub struct HttpFetcherBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl HttpFetcherBuilder {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`HttpFetcher`].
    pub fn build(self) -> Result<HttpFetcher, ApiError> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(HttpFetcher {
            inner: Arc::new(HttpFetcherInner {
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
