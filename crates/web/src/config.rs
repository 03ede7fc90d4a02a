//! Client configuration.

use std::time::Duration;

use anyhow::Context;

/// API base used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme + host (+ port) of the REST API, without trailing slash.
    pub api_base_url: String,
    pub toast_duration: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            toast_duration: TOAST_DURATION,
        }
    }
}

impl ClientConfig {
    /// Build a config for an explicit API base, validating it as an absolute URL.
    pub fn new(api_base_url: impl Into<String>) -> anyhow::Result<Self> {
        let api_base_url = api_base_url.into();
        let parsed = reqwest::Url::parse(&api_base_url)
            .with_context(|| format!("invalid API base URL '{api_base_url}'"))?;
        if parsed.cannot_be_a_base() {
            anyhow::bail!("API base URL '{api_base_url}' cannot be used as a base");
        }

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        })
    }

    /// Read the API base from `STOREFRONT_API_URL`, falling back to the default.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url =
            std::env::var("STOREFRONT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(api_url).context("failed to read client config from environment")
    }

    /// The page is served by the API itself, so the API base is the page origin.
    #[cfg(target_arch = "wasm32")]
    pub fn from_window() -> anyhow::Result<Self> {
        let window = web_sys::window().context("no window object")?;
        let origin = window
            .location()
            .origin()
            .map_err(|e| anyhow::anyhow!("failed to read window origin: {e:?}"))?;
        Self::new(origin)
    }
}
