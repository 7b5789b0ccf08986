use std::fmt;

use crate::{ReqresError, Result};

/// Environment variable holding the target API base URL.
pub const BASE_URL_VAR: &str = "BASE_URL";
/// Environment variable holding the value sent as `x-api-key`.
pub const API_KEY_VAR: &str = "REQRES_API_KEY";
/// Environment variable set by CI runners.
pub const CI_VAR: &str = "CI";

/// Process-wide harness settings, built once and handed to the clients.
#[derive(Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub ci: bool,
}

impl fmt::Debug for HarnessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarnessConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("ci", &self.ci)
            .finish()
    }
}

impl HarnessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            ci: false,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// Reads:
    /// - `BASE_URL` (required, non-empty)
    /// - `REQRES_API_KEY` (optional; empty counts as unset)
    /// - `CI` (truthy unless empty, `0` or `false`)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`HarnessConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR).ok_or_else(|| {
            ReqresError::Config(format!("missing {BASE_URL_VAR} environment variable"))
        })?;
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(ReqresError::Config(format!(
                "{BASE_URL_VAR} is set but empty"
            )));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ReqresError::Config(format!(
                "{BASE_URL_VAR} must be an http(s) URL, got '{base_url}'"
            )));
        }

        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty());
        let ci = lookup(CI_VAR).is_some_and(|value| is_truthy(&value));

        Ok(Self {
            base_url: base_url.to_owned(),
            api_key,
            ci,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}
