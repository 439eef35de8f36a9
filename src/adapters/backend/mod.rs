//! Example backend adapter.
//!
//! Implements the `BackendApi` port against the developer-controlled example
//! backend, plus a configurable mock for tests.
//!
//! # Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST | `customer/login` | `login` |
//! | POST | `customer` | `create_user` |
//! | POST | `charge` | `complete_charge` |
//! | GET | `customer` | `retrieve_customer` |
//! | POST | `customer/default_source` | `select_default_source` |
//! | POST | `customer/sources` | `attach_source` |
//!
//! Paths are relative to the configured base URL. Success is strictly an
//! HTTP status in [200, 300); redirects are not followed.

mod http_adapter;
mod mock_backend;

pub use http_adapter::HttpBackendAdapter;
pub use mock_backend::{MethodCall, MockBackend};
