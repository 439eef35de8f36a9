//! Client configuration module
//!
//! The only external input the client takes is the backend base URL, supplied
//! by the embedding application before the first call. It is parsed and
//! validated eagerly at construction so that a bad URL fails at startup, not
//! inside an operation.
//!
//! # Example
//!
//! ```no_run
//! use checkout_backend_client::config::BackendConfig;
//!
//! let config = BackendConfig::new("https://api.example.com/v1/")
//!     .expect("invalid backend base URL");
//! ```

mod backend;
mod error;

pub use backend::BackendConfig;
pub use error::ConfigError;
