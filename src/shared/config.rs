//! Application configuration. Backend address, token cache, auth stand-ins.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TOKEN_PATH: &str = "./data/tokens.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_STUB_TOKEN: &str = "user-1";
pub const DEFAULT_SIGN_UP_DELAY_MS: u64 = 1000;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Recipe API root. Read from REPI_BASE_URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// JSON file holding the access and refresh tokens. Read from REPI_TOKEN_PATH.
    #[serde(default)]
    pub token_path: Option<String>,

    /// Whole-request timeout in seconds. Read from REPI_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Bearer token used while no real token is cached. Read from REPI_STUB_TOKEN;
    /// an empty value turns the fallback off.
    #[serde(default)]
    pub stub_token: Option<String>,

    /// Latency of the stand-in sign-up. Read from REPI_SIGN_UP_DELAY_MS.
    #[serde(default)]
    pub sign_up_delay_ms: Option<u64>,
}

impl AppConfig {
    /// Environment (prefix `REPI`) plus an optional file named by `REPI_CONFIG`.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("REPI"));
        if let Ok(path) = std::env::var("REPI_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn token_path_or_default(&self) -> PathBuf {
        PathBuf::from(self.token_path.as_deref().unwrap_or(DEFAULT_TOKEN_PATH))
    }

    pub fn request_timeout_or_default(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// `None` when explicitly configured as empty.
    pub fn stub_token_or_default(&self) -> Option<String> {
        match self.stub_token.as_deref() {
            Some("") => None,
            Some(token) => Some(token.to_string()),
            None => Some(DEFAULT_STUB_TOKEN.to_string()),
        }
    }

    pub fn sign_up_delay_or_default(&self) -> Duration {
        Duration::from_millis(self.sign_up_delay_ms.unwrap_or(DEFAULT_SIGN_UP_DELAY_MS))
    }
}
