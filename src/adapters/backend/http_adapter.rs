//! HTTP adapter for the example backend.
//!
//! Implements the `BackendApi` port with a shared `reqwest::Client`. Each
//! operation is one request: build the URL from the validated base, send,
//! check the status range, and map the outcome. Nothing is retried, no
//! timeout is applied beyond the transport's own default, and no adapter
//! state outlives a call.
//!
//! # Error mapping
//!
//! `login` and `create_user` surface a non-empty error body as the error
//! message with the HTTP status as the code. The remaining operations
//! propagate the status failure directly. A 2xx customer payload that does
//! not decode fails with the dedicated decode error.

use async_trait::async_trait;
use reqwest::{redirect, Client, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{BackendConfig, ConfigError};
use crate::ports::{
    BackendApi, BackendError, ChargeRequest, Credentials, Customer, NewUserProfile,
    SourceReference,
};

/// HTTP implementation of the `BackendApi` port.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpBackendAdapter {
    config: BackendConfig,
    http_client: Client,
}

impl HttpBackendAdapter {
    /// Create an adapter for the configured backend.
    pub fn new(config: BackendConfig) -> Result<Self, ConfigError> {
        // A redirect status is a failure for this backend, so never follow one.
        let http_client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| ConfigError::HttpClientInit(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Create an adapter reusing a client built by the embedding application.
    ///
    /// The client should have redirects disabled; a followed redirect would
    /// mask the 3xx status this adapter is required to report as a failure.
    pub fn with_client(config: BackendConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, BackendError> {
        let url = self.config.endpoint(path);
        debug!("POST {}", url);

        self.http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::transport(e.to_string()))
    }

    /// Map a write response to success, ignoring the body.
    async fn expect_success(response: Response) -> Result<(), BackendError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            warn!("backend returned {} for {}", status, response.url());
            Err(status_failure(status))
        }
    }

    /// Map a write response to success, treating a non-empty error body as
    /// the failure message.
    ///
    /// The backend reports login and signup failures as plain-text bodies, so
    /// those become the error message with the status as the code. An empty
    /// body falls back to the plain status failure.
    async fn expect_success_with_body_error(response: Response) -> Result<(), BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        warn!("backend returned {} for {}", status, response.url());
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::transport(e.to_string()))?;

        if body.trim().is_empty() {
            Err(status_failure(status))
        } else {
            Err(BackendError::remote(status.as_u16(), body))
        }
    }
}

/// Status failure for responses handled without body extraction.
fn status_failure(status: StatusCode) -> BackendError {
    BackendError::transport(format!("unacceptable HTTP status: {}", status))
}

#[async_trait]
impl BackendApi for HttpBackendAdapter {
    async fn login(&self, credentials: &Credentials) -> Result<(), BackendError> {
        let response = self.post("customer/login", credentials).await?;
        Self::expect_success_with_body_error(response).await
    }

    async fn create_user(&self, profile: &NewUserProfile) -> Result<(), BackendError> {
        let response = self.post("customer", profile).await?;
        Self::expect_success_with_body_error(response).await
    }

    async fn complete_charge(&self, charge: &ChargeRequest) -> Result<(), BackendError> {
        let response = self.post("charge", charge).await?;
        Self::expect_success(response).await
    }

    async fn retrieve_customer(&self) -> Result<Customer, BackendError> {
        let url = self.config.endpoint("customer");
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| BackendError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("backend returned {} for {}", status, response.url());
            return Err(status_failure(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|_| BackendError::customer_decode())
    }

    async fn select_default_source(&self, source: &SourceReference) -> Result<(), BackendError> {
        let response = self.post("customer/default_source", source).await?;
        Self::expect_success(response).await
    }

    async fn attach_source(&self, source: &SourceReference) -> Result<(), BackendError> {
        let response = self.post("customer/sources", source).await?;
        Self::expect_success(response).await
    }
}
