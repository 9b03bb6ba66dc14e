//! Scanning HTTP Client
//!
//! Builds a `reqwest::Client` tuned for fuzzing and scanning:
//! - Invalid certificates accepted unless verification is requested
//! - Connection limit enforced as an idle pool size plus an in-flight request cap
//! - Redirects returned to the caller instead of followed
//! - Optional proxy and request timeout
//!
//! [`GuiseClient`] pairs such a client with generation options and sends a
//! freshly generated header profile with every request.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Proxy, Response};
use serde::{Deserialize, Deserializer};
use tokio::sync::Semaphore;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::fingerprint::{generate, GenerationOptions, HeaderProfile};

pub const DEFAULT_CONNECTIONS: usize = 30;
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
const MAX_FOLLOWED_REDIRECTS: usize = 10;

/// Client construction and request errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("client is shut down")]
    Closed,
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Transport settings. Out-of-range values fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    #[serde(deserialize_with = "connections_or_default")]
    pub connections: usize,
    pub proxy: Option<String>,
    #[serde(deserialize_with = "timeout_or_default")]
    pub timeout_ms: u64,
    pub allow_redirects: bool,
    pub verify_tls: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connections: DEFAULT_CONNECTIONS,
            proxy: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            allow_redirects: false,
            verify_tls: false,
        }
    }
}

impl ClientOptions {
    /// Zero is ignored.
    #[must_use]
    pub fn with_connections(mut self, n: usize) -> Self {
        if n > 0 {
            self.connections = n;
        }
        self
    }

    /// An empty string means no proxy.
    #[must_use]
    pub fn with_proxy(mut self, proxy: &str) -> Self {
        if !proxy.is_empty() {
            self.proxy = Some(proxy.to_string());
        }
        self
    }

    /// Zero is ignored.
    #[must_use]
    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        if ms > 0 {
            self.timeout_ms = ms;
        }
        self
    }

    #[must_use]
    pub fn with_allow_redirects(mut self, allow: bool) -> Self {
        self.allow_redirects = allow;
        self
    }

    #[must_use]
    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    fn effective_connections(&self) -> usize {
        if self.connections == 0 {
            DEFAULT_CONNECTIONS
        } else {
            self.connections
        }
    }

    fn effective_timeout(&self) -> Duration {
        let ms = if self.timeout_ms == 0 {
            DEFAULT_TIMEOUT_MS
        } else {
            self.timeout_ms
        };
        Duration::from_millis(ms)
    }
}

/// Config values are signed so `0` or negative limits fall back instead of failing to parse.
fn connections_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<usize, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    Ok(usize::try_from(raw).ok().filter(|n| *n > 0).unwrap_or(DEFAULT_CONNECTIONS))
}

fn timeout_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    Ok(u64::try_from(raw).ok().filter(|ms| *ms > 0).unwrap_or(DEFAULT_TIMEOUT_MS))
}

/// Build a reqwest client from transport options.
///
/// A proxy URL that reqwest rejects is logged and skipped.
pub fn build_client(options: &ClientOptions) -> Result<Client> {
    let redirect = if options.allow_redirects {
        reqwest::redirect::Policy::limited(MAX_FOLLOWED_REDIRECTS)
    } else {
        reqwest::redirect::Policy::none()
    };

    let mut builder = Client::builder()
        .use_rustls_tls()
        .danger_accept_invalid_certs(!options.verify_tls)
        .pool_max_idle_per_host(options.effective_connections())
        .timeout(options.effective_timeout())
        .redirect(redirect)
        .gzip(true)
        .brotli(true)
        .deflate(true);

    if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.is_empty()) {
        match Proxy::all(proxy) {
            Ok(p) => builder = builder.proxy(p),
            Err(e) => warn!(proxy, error = %e, "Ignoring unusable proxy"),
        }
    }

    debug!(?options, "Building HTTP client");
    builder.build().map_err(ClientError::Build)
}

/// HTTP client that sends a fresh browser profile with each request.
#[derive(Debug, Clone)]
pub struct GuiseClient {
    client: Client,
    generation: GenerationOptions,
    // reqwest has no max-connections-per-host; cap concurrent requests instead
    in_flight: Arc<Semaphore>,
    limit: usize,
}

impl GuiseClient {
    /// Client with default transport and generation options.
    pub fn new() -> Result<Self> {
        Self::with_options(&ClientOptions::default(), GenerationOptions::default())
    }

    pub fn with_options(transport: &ClientOptions, generation: GenerationOptions) -> Result<Self> {
        let limit = transport.effective_connections();
        Ok(Self {
            client: build_client(transport)?,
            generation,
            in_flight: Arc::new(Semaphore::new(limit)),
            limit,
        })
    }

    /// Profile for a request to `url`. An explicit target URL in the
    /// generation options takes precedence for `Host`.
    #[must_use]
    pub fn profile_for(&self, url: &str) -> HeaderProfile {
        let options = match self.generation.target_url {
            Some(_) => self.generation.clone(),
            None => self.generation.clone().with_target_url(url),
        };
        generate(&options)
    }

    /// GET `url` with a freshly generated profile.
    ///
    /// Waits while `connections` requests are already in flight. The slot is
    /// released once response headers arrive.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<(HeaderProfile, Response)> {
        let profile = self.profile_for(url);
        let _permit = self
            .in_flight
            .acquire()
            .await
            .map_err(|_| ClientError::Closed)?;
        debug!(headers = profile.len(), "Sending request");

        let response = self
            .client
            .get(url)
            .headers(profile.to_header_map())
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.to_string(),
                source,
            })?;

        info!(
            status = %response.status(),
            version = ?response.version(),
            "Response received"
        );

        Ok((profile, response))
    }

    /// The underlying reqwest client
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }

    #[must_use]
    pub fn generation_options(&self) -> &GenerationOptions {
        &self.generation
    }

    /// Maximum number of concurrent requests.
    #[must_use]
    pub fn connection_limit(&self) -> usize {
        self.limit
    }

    /// Request slots currently free.
    #[must_use]
    pub fn available_slots(&self) -> usize {
        self.in_flight.available_permits()
    }
}
