//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration validation.
///
/// All variants are fatal: the client refuses to construct until the
/// configuration is corrected, so no request is ever issued against an
/// unusable base URL.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Base URL must use http or https, got {0}")]
    UnsupportedScheme(String),

    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),
}
