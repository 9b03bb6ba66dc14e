//! `guise` - browser-shaped HTTP request fingerprints
//!
//! # Features
//!
//! - **Header Profiles**: Chrome and Firefox header sets for Windows, macOS and Linux
//! - **Overrides**: user headers always survive; suppressed headers never appear
//! - **Scanning Client**: reqwest client with permissive TLS, pool sizing, proxy and redirect control
//!
//! # Example
//!
//! ```rust,no_run
//! use guise::{ClientOptions, GenerationOptions, GuiseClient, OsTarget};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let generation = GenerationOptions::default().with_os(OsTarget::Random);
//!     let client = GuiseClient::with_options(&ClientOptions::default(), generation)?;
//!     let (profile, response) = client.fetch("https://example.com").await?;
//!     println!("{} headers sent, status {}", profile.len(), response.status());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod fingerprint;
pub mod http_client;

pub use config::{Config, ConfigError};
pub use fingerprint::{
    generate, generate_with, random_headers, Browser, BrowserRestriction, GenerationOptions,
    HeaderProfile, OsTarget, Persona, Platform,
};
pub use http_client::{build_client, ClientError, ClientOptions, GuiseClient};

/// Version of guise
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
