//! Drawer configuration.
//!
//! Use the builder methods to customize, or [`DrawerConfig::from_env`] to
//! read the `THREADLINE_*` environment variables.
//!
//! ```ignore
//! use threadline::config::DrawerConfig;
//!
//! let config = DrawerConfig::default()
//!     .with_base_url("https://api.example.com/v1")
//!     .with_user_id("u-42");
//! config.validate()?;
//! ```

use std::time::Duration;

use crate::error::{DrawerError, DrawerResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

pub const ENV_API_URL: &str = "THREADLINE_API_URL";
pub const ENV_TOKEN: &str = "THREADLINE_TOKEN";
pub const ENV_USER_ID: &str = "THREADLINE_USER_ID";
pub const ENV_TIMEOUT_SECS: &str = "THREADLINE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct DrawerConfig {
    /// Base URL of the conversation service, without trailing slash
    pub base_url: String,
    /// Bearer token sent with every request, if any
    pub auth_token: Option<String>,
    /// Id of the signed-in user, used for authorship
    pub user_id: String,
    /// Upper bound on every remote call
    pub request_timeout: Duration,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: None,
            user_id: String::new(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl DrawerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read configuration from the environment, falling back to defaults.
    ///
    /// An unparsable `THREADLINE_TIMEOUT_SECS` is an error rather than
    /// silently falling back.
    pub fn from_env() -> DrawerResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_API_URL) {
            config = config.with_base_url(url);
        }
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            if !token.trim().is_empty() {
                config = config.with_auth_token(token.trim());
            }
        }
        if let Ok(user_id) = std::env::var(ENV_USER_ID) {
            config = config.with_user_id(user_id.trim());
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                DrawerError::Config(format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))
            })?;
            config = config.with_request_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn validate(&self) -> DrawerResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(DrawerError::Config("base URL is empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(DrawerError::Config(format!(
                "base URL must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(DrawerError::Config("request timeout must be positive".to_string()));
        }
        if self.user_id.trim().is_empty() {
            return Err(DrawerError::Config("user id is empty".to_string()));
        }
        Ok(())
    }
}
