//! Runtime configuration, resolved from flags and environment.

use std::time::Duration;

/// Application configuration.
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub offline: bool,
}

impl Config {
    /// Validates raw settings collected by clap (flags or `FX_*` variables).
    pub fn new(api_url: &str, timeout_secs: u64, offline: bool) -> anyhow::Result<Self> {
        let api_url = api_url.trim();
        if !offline && !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            anyhow::bail!("FX_API_URL must be an http(s) URL, got '{}'", api_url);
        }

        if timeout_secs == 0 {
            anyhow::bail!("FX_TIMEOUT_SECS must be at least 1");
        }

        Ok(Self {
            api_url: api_url.to_string(),
            timeout: Duration::from_secs(timeout_secs),
            offline,
        })
    }
}
