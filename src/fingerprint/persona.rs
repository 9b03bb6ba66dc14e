//! Persona selection: which browser to impersonate, on which platform.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Platform;

/// Browser family a persona imitates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Chrome,
    Firefox,
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Browser::Chrome => "chrome",
            Browser::Firefox => "firefox",
        })
    }
}

/// A concrete browser on a concrete platform. Determines both the header
/// template and the user-agent pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Persona {
    Chrome(Platform),
    Firefox(Platform),
}

impl Persona {
    #[must_use]
    pub fn new(browser: Browser, platform: Platform) -> Self {
        match browser {
            Browser::Chrome => Persona::Chrome(platform),
            Browser::Firefox => Persona::Firefox(platform),
        }
    }

    #[must_use]
    pub fn browser(self) -> Browser {
        match self {
            Persona::Chrome(_) => Browser::Chrome,
            Persona::Firefox(_) => Browser::Firefox,
        }
    }

    #[must_use]
    pub fn platform(self) -> Platform {
        match self {
            Persona::Chrome(p) | Persona::Firefox(p) => p,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.browser(), self.platform())
    }
}

/// Requested operating system. `Random` is resolved on every generation,
/// not when the options are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum OsTarget {
    #[default]
    Windows,
    MacOS,
    Linux,
    Random,
}

impl OsTarget {
    /// Lenient, case-insensitive parse. Unknown tags fall back to Windows.
    #[must_use]
    pub fn parse_lenient(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "w" | "win" | "windows" => OsTarget::Windows,
            "m" | "mac" | "macos" | "osx" => OsTarget::MacOS,
            "l" | "linux" => OsTarget::Linux,
            "r" | "any" | "random" => OsTarget::Random,
            other => {
                debug!(tag = other, "Unknown OS tag, using windows");
                OsTarget::Windows
            }
        }
    }

    /// Pick the platform for one generation.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Platform {
        match self {
            OsTarget::Windows => Platform::Windows,
            OsTarget::MacOS => Platform::MacOS,
            OsTarget::Linux => Platform::Linux,
            OsTarget::Random => match rng.gen_range(0..3) {
                0 => Platform::Windows,
                1 => Platform::MacOS,
                _ => Platform::Linux,
            },
        }
    }
}

impl From<String> for OsTarget {
    fn from(tag: String) -> Self {
        OsTarget::parse_lenient(&tag)
    }
}

/// Limits which browser family may be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum BrowserRestriction {
    Chrome,
    Firefox,
    #[default]
    Unrestricted,
}

impl BrowserRestriction {
    /// Combine the two "only" switches. Chrome wins when both are set.
    #[must_use]
    pub fn from_flags(chrome_only: bool, firefox_only: bool) -> Self {
        if chrome_only {
            BrowserRestriction::Chrome
        } else if firefox_only {
            BrowserRestriction::Firefox
        } else {
            BrowserRestriction::Unrestricted
        }
    }

    #[must_use]
    pub fn parse_lenient(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "chrome" => BrowserRestriction::Chrome,
            "firefox" => BrowserRestriction::Firefox,
            _ => BrowserRestriction::Unrestricted,
        }
    }
}

impl From<String> for BrowserRestriction {
    fn from(tag: String) -> Self {
        BrowserRestriction::parse_lenient(&tag)
    }
}

/// Choose the browser family: restriction first, otherwise a fair coin.
pub fn select_browser<R: Rng + ?Sized>(restriction: BrowserRestriction, rng: &mut R) -> Browser {
    match restriction {
        BrowserRestriction::Chrome => Browser::Chrome,
        BrowserRestriction::Firefox => Browser::Firefox,
        BrowserRestriction::Unrestricted => {
            if rng.gen_bool(0.5) {
                Browser::Firefox
            } else {
                Browser::Chrome
            }
        }
    }
}
