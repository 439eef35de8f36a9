//! Backend endpoint configuration

use reqwest::Url;

use super::error::ConfigError;

/// Backend endpoint configuration.
///
/// Holds the base URL every operation path is resolved against. Set once at
/// application start and immutable afterward.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    base_url: Url,
}

impl BackendConfig {
    /// Create a configuration from an absolute HTTP(S) base URL.
    ///
    /// A trailing slash is appended if missing so that operation paths are
    /// appended to the configured path rather than replacing its last
    /// segment.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = base_url.as_ref().trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingRequired("backend base URL"));
        }

        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{}/", raw)
        };

        let base_url =
            Url::parse(&normalized).map_err(|e| ConfigError::InvalidBaseUrl(e.to_string()))?;

        match base_url.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }

        Ok(Self { base_url })
    }

    /// Create a configuration from the `BACKEND_BASE_URL` environment variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("BACKEND_BASE_URL")
            .map_err(|_| ConfigError::MissingRequired("BACKEND_BASE_URL"))?;
        Self::new(raw)
    }

    /// The validated base URL, always ending in a slash.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a relative operation path against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Url {
        // Joining a fixed relative path onto a validated http(s) base cannot fail.
        self.base_url
            .join(path)
            .expect("relative operation path joins onto validated base URL")
    }
}
