//! Override and suppression handling.
//!
//! Profiles are built in two phases. User overrides are materialized first,
//! then every generated header goes through [`HeaderLayer::set_if_allowed`].
//! A name that is already present is never overwritten, and a suppressed
//! name is never generated. An override therefore survives suppression of
//! the same name.

use tracing::debug;

use super::HeaderProfile;

/// Accumulates one profile while enforcing override and suppression rules.
#[derive(Debug)]
pub struct HeaderLayer<'a> {
    profile: HeaderProfile,
    suppressed: &'a [String],
}

impl<'a> HeaderLayer<'a> {
    #[must_use]
    pub fn new(suppressed: &'a [String]) -> Self {
        Self {
            profile: HeaderProfile::default(),
            suppressed,
        }
    }

    /// Phase one: write user overrides. The first value declared for a name wins.
    pub fn materialize_overrides(&mut self, overrides: &[(String, String)]) {
        for (name, value) in overrides {
            if self.profile.contains(name) {
                debug!(header = %name, "Duplicate override ignored");
                continue;
            }
            self.profile.insert(name.clone(), value.clone());
        }
    }

    /// Phase two: write a generated header unless it is already set or suppressed.
    ///
    /// Returns whether the header was written.
    pub fn set_if_allowed(&mut self, name: &str, value: impl Into<String>) -> bool {
        if self.profile.contains(name) {
            return false;
        }
        if self.is_suppressed(name) {
            debug!(header = name, "Suppressed");
            return false;
        }
        self.profile.insert(name.to_string(), value.into());
        true
    }

    fn is_suppressed(&self, name: &str) -> bool {
        self.suppressed.iter().any(|s| s.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn finish(self) -> HeaderProfile {
        self.profile
    }
}

/// Parse space-delimited `name=value` tokens.
///
/// A token needs exactly one `=` with text on both sides. Anything else is
/// dropped without affecting the remaining tokens.
#[must_use]
pub fn parse_custom_headers(raw: &str) -> Vec<(String, String)> {
    raw.split_whitespace()
        .filter_map(|token| {
            let mut parts = token.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(name), Some(value), None) if !name.is_empty() && !value.is_empty() => {
                    Some((name.to_string(), value.to_string()))
                }
                _ => {
                    debug!(token, "Malformed custom header dropped");
                    None
                }
            }
        })
        .collect()
}

/// Parse a space-delimited list of header names to suppress.
#[must_use]
pub fn parse_suppressed(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
