//! Ports - interfaces between the app and the backend transport.
//!
//! Following hexagonal architecture, the port defines the contract the
//! embedding application programs against. Adapters implement it.
//!
//! - `BackendApi` - the six backend operations (login, signup, charge,
//!   customer retrieval, source management)

mod backend_api;

pub use backend_api::{
    BackendApi, BackendError, BackendErrorKind, ChargeRequest, Credentials, Customer,
    NewUserProfile, SourceReference, CUSTOMER_DECODE_CODE,
};
