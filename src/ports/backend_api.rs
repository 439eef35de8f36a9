//! Backend API port for the example backend.
//!
//! Defines the contract between the mobile app and its backend: session,
//! signup, charge, and payment source operations. Implementations handle the
//! actual transport.
//!
//! # Design
//!
//! - **Fire once**: every operation resolves exactly once, with success or a
//!   `BackendError`, never both
//! - **Stateless**: all inputs are per-call values; nothing is persisted by
//!   the port
//! - **Caller-owned recovery**: nothing is retried or swallowed internally

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for the example backend.
///
/// Calls are independent asynchronous requests against a shared transport;
/// they are unordered unless the caller sequences them.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Log an existing user in.
    async fn login(&self, credentials: &Credentials) -> Result<(), BackendError>;

    /// Create a new user account.
    async fn create_user(&self, profile: &NewUserProfile) -> Result<(), BackendError>;

    /// Complete a charge against a payment source.
    async fn complete_charge(&self, charge: &ChargeRequest) -> Result<(), BackendError>;

    /// Retrieve the current customer record.
    async fn retrieve_customer(&self) -> Result<Customer, BackendError>;

    /// Select the customer's default payment source.
    async fn select_default_source(&self, source: &SourceReference) -> Result<(), BackendError>;

    /// Attach a payment source to the customer.
    async fn attach_source(&self, source: &SourceReference) -> Result<(), BackendError>;
}

/// Login credentials, passed per call and never stored.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Account email address.
    pub email: String,

    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Create login credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signup details for a new user account.
///
/// Optional names are sent only when present and non-empty; absent or empty
/// names are omitted from the request body entirely, never sent as empty
/// strings.
#[derive(Clone, Serialize)]
pub struct NewUserProfile {
    /// Account email address.
    pub email: String,

    /// Account password.
    pub password: String,

    /// Given name, omitted from the body when empty.
    #[serde(rename = "firstName", skip_serializing_if = "is_absent")]
    pub first_name: Option<String>,

    /// Family name, omitted from the body when empty.
    #[serde(rename = "lastName", skip_serializing_if = "is_absent")]
    pub last_name: Option<String>,
}

fn is_absent(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

impl NewUserProfile {
    /// Create signup details. Empty optional names are normalized to absent.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            first_name: first_name.filter(|s| !s.is_empty()),
            last_name: last_name.filter(|s| !s.is_empty()),
        }
    }
}

impl std::fmt::Debug for NewUserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUserProfile")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// A charge to complete against a payment source.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeRequest {
    /// Opaque payment source token to charge.
    pub source: String,

    /// Amount in the currency's minor units (e.g. cents).
    pub amount: i64,
}

impl ChargeRequest {
    /// Create a charge request.
    pub fn new(source: impl Into<String>, amount: i64) -> Self {
        Self {
            source: source.into(),
            amount,
        }
    }
}

/// Reference to a payment source, used for both default-source selection and
/// source attachment.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReference {
    /// Opaque payment source token.
    pub source: String,
}

impl SourceReference {
    /// Create a payment source reference.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Customer record returned by the backend.
///
/// The client validates only that the payload decodes. Beyond the required
/// `id`, content is carried opaquely for the embedding application to
/// interpret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Backend's customer ID.
    pub id: String,

    /// Currently selected default payment source, if any.
    #[serde(default)]
    pub default_source: Option<String>,

    /// Attached payment sources, carried as-is.
    #[serde(default)]
    pub sources: Vec<serde_json::Value>,
}

/// Fixed code reported when the customer payload cannot be decoded.
pub const CUSTOMER_DECODE_CODE: i64 = 50;

const CUSTOMER_DECODE_MESSAGE: &str =
    "Failed to decode the customer record. Have you modified the example backend?";

/// Errors from backend operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendError {
    /// Error category.
    pub kind: BackendErrorKind,

    /// HTTP status for remote errors, [`CUSTOMER_DECODE_CODE`] for decode
    /// mismatches, absent for transport failures.
    pub code: Option<i64>,

    /// Human-readable message. For remote errors this is the backend's own
    /// response body text.
    pub message: String,

    /// Whether the operation can be retried by the caller.
    pub retryable: bool,
}

impl BackendError {
    /// Error body returned by the backend with a non-success status.
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: BackendErrorKind::RemoteServer,
            code: Some(i64::from(status)),
            message: message.into(),
            retryable: false,
        }
    }

    /// Network or status failure with no usable error body.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: BackendErrorKind::Transport,
            code: None,
            message: message.into(),
            retryable: true,
        }
    }

    /// Customer payload did not match the expected shape.
    pub fn customer_decode() -> Self {
        Self {
            kind: BackendErrorKind::Decoding,
            code: Some(CUSTOMER_DECODE_CODE),
            message: CUSTOMER_DECODE_MESSAGE.to_string(),
            retryable: false,
        }
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for BackendError {}

/// Backend error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendErrorKind {
    /// Backend answered outside [200, 300) with an error body.
    RemoteServer,

    /// Network failure, or an HTTP failure surfaced without an error body.
    Transport,

    /// Backend answered 2xx but the payload did not decode.
    Decoding,
}

impl BackendErrorKind {
    /// Check if this error category is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BackendErrorKind::Transport)
    }
}

impl std::fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BackendErrorKind::RemoteServer => "remote_server_error",
            BackendErrorKind::Transport => "transport_error",
            BackendErrorKind::Decoding => "decoding_error",
        };
        write!(f, "{}", s)
    }
}
