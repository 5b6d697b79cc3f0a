//! Client configuration.

use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for connecting to a MusicShack server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the server (e.g., "https://music.example.com")
    pub base_url: String,

    /// Root of the user API, relative to `base_url`
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Root of the admin API, relative to `base_url`
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,

    /// Session cookie (`name=value`) to seed the cookie jar with
    #[serde(default)]
    pub session_cookie: Option<String>,

    /// Whole-request timeout. Unset or 0 lets requests run until the server answers.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Connection timeout. Unset or 0 means none.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_admin_prefix() -> String {
    "/api/admin".to_string()
}

impl ClientConfig {
    /// Create a config with just the server URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_prefix: default_api_prefix(),
            admin_prefix: default_admin_prefix(),
            session_cookie: None,
            timeout_secs: None,
            connect_timeout_secs: None,
        }
    }

    /// Attach a session cookie.
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    /// Load configuration from an optional TOML file and the environment.
    ///
    /// Environment variables are prefixed with `SHACK_` (`SHACK_BASE_URL`,
    /// `SHACK_SESSION_COOKIE`, ...) and override the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ApiError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(config::Environment::with_prefix("SHACK").try_parsing(true));

        let config = settings
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        loaded.validated()
    }

    /// Validate and return a normalized copy.
    ///
    /// Trailing slashes are removed from the URL and the prefixes, and the
    /// prefixes always start with a slash.
    pub fn validated(&self) -> Result<Self> {
        if self.base_url.is_empty() {
            return Err(ApiError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = self.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            base_url,
            api_prefix: normalize_prefix(&self.api_prefix),
            admin_prefix: normalize_prefix(&self.admin_prefix),
            session_cookie: self.session_cookie.clone(),
            timeout_secs: self.timeout_secs.filter(|&secs| secs > 0),
            connect_timeout_secs: self.connect_timeout_secs.filter(|&secs| secs > 0),
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        positive_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        positive_secs(self.connect_timeout_secs)
    }
}

fn positive_secs(secs: Option<u64>) -> Option<Duration> {
    secs.filter(|&secs| secs > 0).map(Duration::from_secs)
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_url_validation() {
        assert!(ClientConfig::new("https://example.com").validated().is_ok());
        assert!(ClientConfig::new("http://localhost:8080").validated().is_ok());

        assert!(ClientConfig::new("").validated().is_err());
        assert!(ClientConfig::new("not-a-url").validated().is_err());
        assert!(ClientConfig::new("ftp://example.com").validated().is_err());
    }

    #[test]
    fn test_normalization() {
        let mut config = ClientConfig::new("https://example.com///");
        config.api_prefix = "api/".into();
        config.admin_prefix = "/api/admin/".into();

        let config = config.validated().unwrap();
        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.admin_prefix, "/api/admin");
    }

    #[test]
    fn test_empty_prefix_is_root() {
        let mut config = ClientConfig::new("https://example.com");
        config.api_prefix = "/".into();
        assert_eq!(config.validated().unwrap().api_prefix, "");
    }

    #[test]
    fn test_no_timeout_by_default() {
        let config = ClientConfig::new("https://example.com").validated().unwrap();
        assert_eq!(config.timeout(), None);
        assert_eq!(config.connect_timeout(), None);
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let mut config = ClientConfig::new("https://example.com");
        config.timeout_secs = Some(0);
        config.connect_timeout_secs = Some(3);

        let config = config.validated().unwrap();
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "base_url = \"https://shack.example.com/\"\nsession_cookie = \"session=abc\"\ntimeout_secs = 5"
        )
        .unwrap();

        let config = ClientConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.base_url, "https://shack.example.com");
        assert_eq!(config.session_cookie.as_deref(), Some("session=abc"));
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.connect_timeout_secs, None);
        assert_eq!(config.api_prefix, "/api");
    }

    #[test]
    fn test_load_missing_file() {
        let result = ClientConfig::load(Some(Path::new("/nonexistent/shack.toml")));
        assert!(matches!(result, Err(ApiError::Config(_))));
    }
}
