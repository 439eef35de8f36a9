//! Adapters - implementations of port interfaces.
//!
//! - `backend` - HTTP client for the example backend, plus a test mock

pub mod backend;

pub use backend::{HttpBackendAdapter, MockBackend};
