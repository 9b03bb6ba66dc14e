//! Browser Header Fingerprints
//!
//! Generates header sets that resemble a real Chrome or Firefox install on
//! Windows, macOS or Linux.
//!
//! Each call picks a persona, assembles that persona's template and applies
//! user overrides and suppressions. No state is shared between calls. Pass a
//! seeded RNG to [`generate_with`] for reproducible output.
//!
//! # Example
//!
//! ```rust
//! use guise::fingerprint::{generate, BrowserRestriction, GenerationOptions, OsTarget};
//!
//! let options = GenerationOptions::default()
//!     .with_os(OsTarget::MacOS)
//!     .with_browser(BrowserRestriction::Chrome)
//!     .with_custom_headers("X-Trace=abc")
//!     .with_target_url("https://example.com/login");
//!
//! let profile = generate(&options);
//! assert_eq!(profile.get("sec-ch-ua-platform"), Some("Macintosh"));
//! assert_eq!(profile.get("Host"), Some("example.com"));
//! assert_eq!(profile.get("X-Trace"), Some("abc"));
//! ```

pub mod assemble;
pub mod corpus;
pub mod layer;
pub mod persona;

#[cfg(test)]
mod tests;

use std::fmt;

use indexmap::IndexMap;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use tracing::{debug, warn};

pub use assemble::{CHROME_HEADER_COUNT, FIREFOX_HEADER_COUNT};
pub use layer::{parse_custom_headers, parse_suppressed, HeaderLayer};
pub use persona::{select_browser, Browser, BrowserRestriction, OsTarget, Persona};

/// Operating system class a persona runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    MacOS,
    Linux,
}

impl Platform {
    /// Value of the `sec-ch-ua-platform` client hint.
    #[must_use]
    pub fn client_hint(self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOS => "Macintosh",
            Platform::Linux => "Linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Windows => "windows",
            Platform::MacOS => "macos",
            Platform::Linux => "linux",
        })
    }
}

/// Everything that shapes one generation. Build it, then hand it to [`generate`].
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub os: OsTarget,
    pub browser: BrowserRestriction,
    /// Ordered `name=value` overrides; the first declaration of a name wins.
    pub custom_headers: Vec<(String, String)>,
    pub suppressed: Vec<String>,
    /// Only used to derive `Host`.
    pub target_url: Option<String>,
}

impl GenerationOptions {
    #[must_use]
    pub fn with_os(mut self, os: OsTarget) -> Self {
        self.os = os;
        self
    }

    #[must_use]
    pub fn with_browser(mut self, browser: BrowserRestriction) -> Self {
        self.browser = browser;
        self
    }

    /// Append overrides parsed from space-delimited `name=value` tokens.
    #[must_use]
    pub fn with_custom_headers(mut self, raw: &str) -> Self {
        self.custom_headers.extend(parse_custom_headers(raw));
        self
    }

    /// Append space-delimited header names to suppress.
    #[must_use]
    pub fn with_suppressed_headers(mut self, raw: &str) -> Self {
        self.suppressed.extend(parse_suppressed(raw));
        self
    }

    #[must_use]
    pub fn with_target_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.target_url = (!url.is_empty()).then_some(url);
        self
    }
}

/// Generated headers: name to one or more values, in insertion order.
///
/// Names keep the casing they were emitted with. Lookups ignore ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderProfile {
    headers: IndexMap<String, Vec<String>>,
}

impl HeaderProfile {
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values(name).is_some()
    }

    /// First value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    #[must_use]
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.headers
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.headers.keys().map(String::as_str)
    }

    /// Add a value under `name`, appending when the exact name already exists.
    pub(crate) fn insert(&mut self, name: String, value: String) {
        self.headers.entry(name).or_default().push(value);
    }

    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.headers
    }

    /// Convert to a reqwest `HeaderMap`.
    ///
    /// `http` lowercases names. Names or values that are not valid HTTP are
    /// skipped.
    #[must_use]
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, values) in &self.headers {
            let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
                warn!(header = %name, "Skipping invalid header name");
                continue;
            };
            for value in values {
                match HeaderValue::from_str(value) {
                    Ok(v) => {
                        map.append(header_name.clone(), v);
                    }
                    Err(_) => warn!(header = %name, "Skipping invalid header value"),
                }
            }
        }
        map
    }
}

impl<'a> IntoIterator for &'a HeaderProfile {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}

/// Host (plus any non-default port) of a URL, or `None` if it does not parse.
#[must_use]
pub fn host_from_url(raw: &str) -> Option<String> {
    let url = url::Url::parse(raw).ok()?;
    let host = url.host_str().filter(|h| !h.is_empty())?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Generate a profile using the thread-local RNG.
#[must_use]
pub fn generate(options: &GenerationOptions) -> HeaderProfile {
    generate_with(options, &mut rand::thread_rng())
}

/// Generate a profile from an explicit randomness source.
pub fn generate_with<R: Rng + ?Sized>(options: &GenerationOptions, rng: &mut R) -> HeaderProfile {
    let platform = options.os.resolve(rng);
    let persona = Persona::new(select_browser(options.browser, rng), platform);
    debug!(%persona, "Generating header profile");

    let mut layer = HeaderLayer::new(&options.suppressed);
    layer.materialize_overrides(&options.custom_headers);

    if let Some(raw) = options.target_url.as_deref() {
        match host_from_url(raw) {
            Some(host) => {
                layer.set_if_allowed("Host", host);
            }
            None => debug!(url = raw, "Target URL has no usable host, Host not set"),
        }
    }

    for (name, value) in assemble::assemble(persona, rng) {
        layer.set_if_allowed(name, value);
    }

    layer.finish()
}

/// A fresh profile with default options (Windows, either browser).
#[must_use]
pub fn random_headers() -> HeaderProfile {
    generate(&GenerationOptions::default())
}
