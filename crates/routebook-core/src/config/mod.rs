//! Remote mirror configuration.
//!
//! The mirror is enabled only when both a project URL and an anon key are
//! present. Either one missing means local-only mode, which is not an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::{is_http_url, normalize_text_option};

/// Environment variables checked for the project URL, in priority order
pub const URL_ENV_VARS: [&str; 2] = ["ROUTEBOOK_SUPABASE_URL", "SUPABASE_URL"];

/// Environment variables checked for the anon key, in priority order
pub const ANON_KEY_ENV_VARS: [&str; 2] = ["ROUTEBOOK_SUPABASE_ANON_KEY", "SUPABASE_ANON_KEY"];

/// Connection settings for the hosted backend
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
}

impl RemoteConfig {
    /// Create a configuration from explicit values
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: normalize_text_option(Some(url.into())),
            anon_key: normalize_text_option(Some(anon_key.into())),
        }
    }

    /// Read the configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let first = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| normalize_text_option(lookup(key)))
        };
        Self {
            url: first(&URL_ENV_VARS),
            anon_key: first(&ANON_KEY_ENV_VARS),
        }
    }

    /// Fill missing values from `fallback`
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            url: normalize_text_option(self.url).or_else(|| normalize_text_option(fallback.url)),
            anon_key: normalize_text_option(self.anon_key)
                .or_else(|| normalize_text_option(fallback.anon_key)),
        }
    }

    /// Check if both the URL and the anon key are present
    pub fn is_configured(&self) -> bool {
        normalize_text_option(self.url.clone()).is_some()
            && normalize_text_option(self.anon_key.clone()).is_some()
    }

    /// PostgREST base URL (`<project>/rest/v1`), if the project URL is usable
    pub fn rest_url(&self) -> Option<String> {
        let url = normalize_text_option(self.url.clone())?;
        if !is_http_url(&url) {
            return None;
        }
        Some(format!("{}/rest/v1", url.trim_end_matches('/')))
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RemoteConfig")
            .field("url", &self.url)
            .field(
                "anon_key",
                &self.anon_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
