//! Mock backend for testing.
//!
//! Configurable in-memory implementation of `BackendApi` for unit and
//! integration tests. Supports:
//! - Pre-configured customer payloads
//! - Error injection, globally or per method
//! - Call tracking with argument capture

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::ports::{
    BackendApi, BackendError, ChargeRequest, Credentials, Customer, NewUserProfile,
    SourceReference,
};

/// Mock backend for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockBackend::new();
///
/// // Configure responses
/// mock.set_customer(Customer { id: "cus_123".into(), ... });
///
/// // Inject errors
/// mock.set_error(BackendError::remote(400, "invalid password"));
///
/// // Use in tests
/// let result = mock.login(&credentials).await;
/// ```
#[derive(Default)]
pub struct MockBackend {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Customer returned by `retrieve_customer`.
    customer: Option<Customer>,

    /// Emails of accounts created through `create_user`.
    created_accounts: Vec<String>,

    /// Charges accepted through `complete_charge`.
    charges: Vec<(String, i64)>,

    /// Error to return on next call.
    next_error: Option<BackendError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, BackendError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock with a pre-configured customer.
    pub fn with_customer(customer: Customer) -> Self {
        let mock = Self::new();
        mock.set_customer(customer);
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the customer returned by `retrieve_customer`.
    pub fn set_customer(&self, customer: Customer) {
        self.inner.lock().unwrap().customer = Some(customer);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: BackendError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: BackendError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // State Accessors
    // ════════════════════════════════════════════════════════════════════════════

    /// Emails of accounts created through `create_user`.
    pub fn created_accounts(&self) -> Vec<String> {
        self.inner.lock().unwrap().created_accounts.clone()
    }

    /// Charges accepted through `complete_charge`, as (source, amount) pairs.
    pub fn charges(&self) -> Vec<(String, i64)> {
        self.inner.lock().unwrap().charges.clone()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .any(|c| c.method == method)
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().call_log.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), BackendError> {
        let mut state = self.inner.lock().unwrap();

        // Method-specific error wins
        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Global error is one-shot
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockBackend {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn login(&self, credentials: &Credentials) -> Result<(), BackendError> {
        self.record_call("login", vec![credentials.email.clone()]);
        self.check_error("login")
    }

    async fn create_user(&self, profile: &NewUserProfile) -> Result<(), BackendError> {
        self.record_call("create_user", vec![profile.email.clone()]);
        self.check_error("create_user")?;

        self.inner
            .lock()
            .unwrap()
            .created_accounts
            .push(profile.email.clone());

        Ok(())
    }

    async fn complete_charge(&self, charge: &ChargeRequest) -> Result<(), BackendError> {
        self.record_call(
            "complete_charge",
            vec![charge.source.clone(), charge.amount.to_string()],
        );
        self.check_error("complete_charge")?;

        self.inner
            .lock()
            .unwrap()
            .charges
            .push((charge.source.clone(), charge.amount));

        Ok(())
    }

    async fn retrieve_customer(&self) -> Result<Customer, BackendError> {
        self.record_call("retrieve_customer", vec![]);
        self.check_error("retrieve_customer")?;

        let state = self.inner.lock().unwrap();
        state
            .customer
            .clone()
            .ok_or_else(BackendError::customer_decode)
    }

    async fn select_default_source(&self, source: &SourceReference) -> Result<(), BackendError> {
        self.record_call("select_default_source", vec![source.source.clone()]);
        self.check_error("select_default_source")?;

        let mut state = self.inner.lock().unwrap();
        if let Some(customer) = state.customer.as_mut() {
            customer.default_source = Some(source.source.clone());
        }

        Ok(())
    }

    async fn attach_source(&self, source: &SourceReference) -> Result<(), BackendError> {
        self.record_call("attach_source", vec![source.source.clone()]);
        self.check_error("attach_source")?;

        let mut state = self.inner.lock().unwrap();
        if let Some(customer) = state.customer.as_mut() {
            customer.sources.push(json!({ "id": source.source }));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Test Helpers
// ════════════════════════════════════════════════════════════════════════════════

impl MockBackend {
    /// Create a mock with a customer that has one attached source.
    pub fn with_attached_source(customer_id: &str, source_id: &str) -> Self {
        Self::with_customer(Customer {
            id: customer_id.to_string(),
            default_source: Some(source_id.to_string()),
            sources: vec![json!({ "id": source_id })],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::BackendErrorKind;

    fn test_customer() -> Customer {
        Customer {
            id: "cus_test".to_string(),
            default_source: None,
            sources: vec![],
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Basic Operation Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn login_succeeds_by_default() {
        let mock = MockBackend::new();
        let result = mock.login(&Credentials::new("a@b.com", "pw")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn create_user_records_account() {
        let mock = MockBackend::new();

        mock.create_user(&NewUserProfile::new("a@b.com", "pw", None, None))
            .await
            .unwrap();

        assert_eq!(mock.created_accounts(), vec!["a@b.com"]);
    }

    #[tokio::test]
    async fn complete_charge_records_source_and_amount() {
        let mock = MockBackend::new();

        mock.complete_charge(&ChargeRequest::new("src_1", 500))
            .await
            .unwrap();

        assert_eq!(mock.charges(), vec![("src_1".to_string(), 500)]);
    }

    #[tokio::test]
    async fn retrieve_customer_without_configuration_is_decode_error() {
        let mock = MockBackend::new();

        let err = mock.retrieve_customer().await.unwrap_err();

        assert_eq!(err.kind, BackendErrorKind::Decoding);
        assert_eq!(err.code, Some(50));
    }

    #[tokio::test]
    async fn retrieve_customer_returns_configured() {
        let mock = MockBackend::with_customer(test_customer());

        let customer = mock.retrieve_customer().await.unwrap();

        assert_eq!(customer.id, "cus_test");
    }

    #[tokio::test]
    async fn select_default_source_updates_customer() {
        let mock = MockBackend::with_customer(test_customer());

        mock.select_default_source(&SourceReference::new("src_7"))
            .await
            .unwrap();

        let customer = mock.retrieve_customer().await.unwrap();
        assert_eq!(customer.default_source.as_deref(), Some("src_7"));
    }

    #[tokio::test]
    async fn attach_source_appends_to_customer() {
        let mock = MockBackend::with_attached_source("cus_1", "src_1");

        mock.attach_source(&SourceReference::new("src_2"))
            .await
            .unwrap();

        let customer = mock.retrieve_customer().await.unwrap();
        assert_eq!(customer.sources.len(), 2);
        assert_eq!(customer.sources[1]["id"], "src_2");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Error Injection Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn set_error_fails_next_call_only() {
        let mock = MockBackend::new();
        mock.set_error(BackendError::remote(400, "invalid password"));

        let err = mock
            .login(&Credentials::new("a@b.com", "pw"))
            .await
            .unwrap_err();
        assert_eq!(err.code, Some(400));

        // One-shot: the following call succeeds
        assert!(mock.login(&Credentials::new("a@b.com", "pw")).await.is_ok());
    }

    #[tokio::test]
    async fn set_method_error_only_affects_method() {
        let mock = MockBackend::new();
        mock.set_method_error("complete_charge", BackendError::transport("offline"));

        assert!(mock.login(&Credentials::new("a@b.com", "pw")).await.is_ok());

        let err = mock
            .complete_charge(&ChargeRequest::new("src_1", 100))
            .await
            .unwrap_err();
        assert_eq!(err.kind, BackendErrorKind::Transport);
    }

    #[tokio::test]
    async fn clear_errors_restores_success() {
        let mock = MockBackend::new();
        mock.set_method_error("login", BackendError::transport("offline"));
        mock.clear_errors();

        assert!(mock.login(&Credentials::new("a@b.com", "pw")).await.is_ok());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn tracks_method_calls() {
        let mock = MockBackend::new();

        mock.login(&Credentials::new("a@b.com", "pw")).await.unwrap();

        assert!(mock.was_called("login"));
        assert_eq!(mock.call_count("login"), 1);
        assert!(!mock.was_called("complete_charge"));
    }

    #[tokio::test]
    async fn call_log_contains_arguments() {
        let mock = MockBackend::new();

        mock.complete_charge(&ChargeRequest::new("src_1", 500))
            .await
            .unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].args.contains(&"src_1".to_string()));
        assert!(calls[0].args.contains(&"500".to_string()));
    }

    #[tokio::test]
    async fn call_log_never_captures_passwords() {
        let mock = MockBackend::new();

        mock.login(&Credentials::new("a@b.com", "hunter2"))
            .await
            .unwrap();
        mock.create_user(&NewUserProfile::new("c@d.com", "hunter2", None, None))
            .await
            .unwrap();

        for call in mock.calls() {
            assert!(!call.args.iter().any(|a| a.contains("hunter2")));
        }
    }

    #[tokio::test]
    async fn clear_calls_resets_log() {
        let mock = MockBackend::new();

        mock.login(&Credentials::new("a@b.com", "pw")).await.unwrap();
        assert_eq!(mock.call_count("login"), 1);

        mock.clear_calls();

        assert_eq!(mock.call_count("login"), 0);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let mock = MockBackend::new();
        let cloned = mock.clone();

        cloned.login(&Credentials::new("a@b.com", "pw")).await.unwrap();

        assert!(mock.was_called("login"));
    }
}
