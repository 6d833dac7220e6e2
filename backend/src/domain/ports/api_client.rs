//! Driven port for the storefront HTTP API.
//!
//! Every verb resolves to an [`Envelope`]; implementations must never panic
//! or return early with an error the caller has to catch. Paths are relative
//! to the adapter's configured base (`/orders`, `/users/42`).

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;
use crate::domain::Envelope;

define_port_error! {
    /// Failure taxonomy collapsed into envelope error messages.
    pub enum ApiError {
        /// The referenced entity does not exist.
        NotFound { message: String } =>
            "not found: {message}",
        /// A required field was missing or malformed.
        Validation { message: String } =>
            "validation failed: {message}",
        /// The request never produced a response.
        Network { message: String } =>
            "network request failed: {message}",
        /// The server answered with a non-success status.
        Status { status: u16, message: String } =>
            "request failed with status {status}: {message}",
        /// The response body was not the expected JSON.
        Decode { message: String } =>
            "response decode failed: {message}",
    }
}

impl ApiError {
    /// HTTP status behind the failure, when the server produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

/// Generic fetch wrapper over the storefront API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Issue a `GET` for `path`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use storefront::domain::ports::ApiClient;
    ///
    /// let orders = client.get("/orders").await;
    /// if let Some(error) = orders.error() {
    ///     tracing::warn!(%error, "orders unavailable");
    /// }
    /// ```
    async fn get(&self, path: &str) -> Envelope<Value>;

    /// Issue a `POST` for `path` with a JSON body.
    async fn post(&self, path: &str, body: &Value) -> Envelope<Value>;

    /// Issue a `PUT` for `path` with a JSON body.
    async fn put(&self, path: &str, body: &Value) -> Envelope<Value>;
}
