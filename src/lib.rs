//! Checkout Backend Client
//!
//! Async HTTP adapter used by the mobile checkout app to talk to its
//! developer-controlled example backend: login, signup, charge completion,
//! customer retrieval, and payment source management.

pub mod adapters;
pub mod config;
pub mod ports;
