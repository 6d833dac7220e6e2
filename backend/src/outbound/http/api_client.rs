//! Reqwest-backed adapter for the storefront API port.
//!
//! This adapter owns transport details only: URL joining, JSON request
//! bodies, HTTP status mapping, and decoding. Every outcome is folded into an
//! [`Envelope`] and failures are logged before they are returned.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, header};
use serde_json::Value;
use tracing::warn;
use url::Url;

use crate::config::ClientSettings;
use crate::domain::Envelope;
use crate::domain::ports::{ApiClient, ApiError, define_port_error};

const FALLBACK_STATUS_MESSAGE: &str = "Something went wrong";

define_port_error! {
    /// Errors raised while constructing an [`HttpApiClient`].
    pub enum HttpApiClientError {
        /// The base URL is not an absolute `http` or `https` URL.
        InvalidBaseUrl { message: String } =>
            "invalid base URL: {message}",
        /// The underlying reqwest client could not be built.
        Client { message: String } =>
            "failed to build HTTP client: {message}",
    }
}

/// Storefront API client issuing JSON requests beneath one base URL.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    /// Build a client rooted at `base_url`.
    ///
    /// A trailing slash on the base is ignored, so `http://host/api/` and
    /// `http://host/api` resolve `/orders` identically.
    ///
    /// ```rust,ignore
    /// let client = HttpApiClient::new("http://localhost:8080/api", "storefront/0.1")?;
    /// let orders = client.get("/orders").await;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`HttpApiClientError::InvalidBaseUrl`] when the base is not an
    /// absolute `http`/`https` URL without query or fragment, and
    /// [`HttpApiClientError::Client`] when reqwest cannot build its client.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, HttpApiClientError> {
        let parsed = Url::parse(base_url).map_err(|error| {
            HttpApiClientError::invalid_base_url(format!("{base_url}: {error}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(HttpApiClientError::invalid_base_url(format!(
                "{base_url}: scheme must be http or https"
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(HttpApiClientError::invalid_base_url(format!(
                "{base_url}: query and fragment are not allowed"
            )));
        }

        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|error| HttpApiClientError::client(error.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Build a client from loaded [`ClientSettings`].
    ///
    /// # Errors
    ///
    /// See [`HttpApiClient::new`].
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, HttpApiClientError> {
        Self::new(settings.base_url(), settings.user_agent())
    }

    /// Base URL requests are resolved against, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Envelope<Value> {
        let url = self.endpoint(path);
        let outcome = self.execute(method.clone(), &url, body).await;
        if let Err(error) = &outcome {
            warn!(
                %method,
                %url,
                status = error.status_code(),
                %error,
                "storefront API request failed"
            );
        }
        Envelope::from(outcome)
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut request = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }
        parse_body(bytes.as_ref())
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, path: &str) -> Envelope<Value> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Envelope<Value> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> Envelope<Value> {
        self.send(Method::PUT, path, Some(body)).await
    }
}

/// Empty bodies (`204 No Content`, bare acknowledgements) decode as `null`.
fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|error| ApiError::decode(format!("invalid JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_decode() {
        ApiError::decode(error.to_string())
    } else {
        ApiError::network(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = server_message(body)
        .or_else(|| Some(body_preview(body)).filter(|preview| !preview.is_empty()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or(FALLBACK_STATUS_MESSAGE)
                .to_owned()
        });

    match status {
        StatusCode::NOT_FOUND => ApiError::not_found(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::validation(message)
        }
        _ => ApiError::status(status.as_u16(), message),
    }
}

/// The `message` (or `error`) string of a JSON error body.
fn server_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .into_iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the non-network helpers.

    use super::*;
    use rstest::rstest;

    fn client(base_url: &str) -> HttpApiClient {
        HttpApiClient::new(base_url, "storefront-tests").expect("base URL should be valid")
    }

    #[rstest]
    #[case::rooted_path("http://localhost:8080/api", "/orders", "http://localhost:8080/api/orders")]
    #[case::bare_path("http://localhost:8080/api", "orders", "http://localhost:8080/api/orders")]
    #[case::trailing_slash_base("http://localhost:8080/api/", "/orders", "http://localhost:8080/api/orders")]
    #[case::host_only_base("https://shop.example", "/user/profile", "https://shop.example/user/profile")]
    #[case::query_in_path(
        "http://localhost:8080/api",
        "/transactions?userId=u1",
        "http://localhost:8080/api/transactions?userId=u1"
    )]
    fn joins_paths_onto_the_base(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
        assert_eq!(client(base).endpoint(path), expected);
    }

    #[rstest]
    #[case::relative("/api")]
    #[case::unsupported_scheme("ftp://files.example/api")]
    #[case::with_query("http://localhost:8080/api?debug=1")]
    #[case::with_fragment("http://localhost:8080/api#top")]
    fn rejects_unusable_base_urls(#[case] base: &str) {
        let error = HttpApiClient::new(base, "storefront-tests").expect_err("base should fail");
        assert!(
            matches!(error, HttpApiClientError::InvalidBaseUrl { .. }),
            "unexpected error: {error}"
        );
    }

    #[rstest]
    #[case::not_found(StatusCode::NOT_FOUND, "not found: order o9 missing")]
    #[case::bad_request(StatusCode::BAD_REQUEST, "validation failed: order o9 missing")]
    #[case::unprocessable(
        StatusCode::UNPROCESSABLE_ENTITY,
        "validation failed: order o9 missing"
    )]
    #[case::server_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "request failed with status 500: order o9 missing"
    )]
    fn maps_statuses_to_api_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(status, br#"{"message":"order o9 missing"}"#);
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::message_field(br#"{"message":"bad token","error":"ignored"}"#.as_slice(), "bad token")]
    #[case::error_field(br#"{"error":"quota exceeded"}"#.as_slice(), "quota exceeded")]
    #[case::plain_text(b"upstream   exploded\n".as_slice(), "upstream exploded")]
    #[case::empty_body(b"".as_slice(), "Service Unavailable")]
    #[case::blank_message(br#"{"message":"  "}"#.as_slice(), r#"{"message":" "}"#)]
    fn status_messages_prefer_the_server_text(#[case] body: &[u8], #[case] expected: &str) {
        let error = map_status_error(StatusCode::SERVICE_UNAVAILABLE, body);
        assert_eq!(
            error,
            ApiError::status(503_u16, expected),
            "unexpected mapping for {}",
            String::from_utf8_lossy(body)
        );
    }

    #[rstest]
    #[case::empty(b"".as_slice())]
    #[case::whitespace(b" \n".as_slice())]
    fn empty_bodies_decode_as_null(#[case] body: &[u8]) {
        assert_eq!(parse_body(body), Ok(Value::Null));
    }

    #[rstest]
    fn invalid_json_maps_to_decode_errors() {
        let error = parse_body(b"<html>oops</html>").expect_err("HTML is not JSON");
        assert!(matches!(error, ApiError::Decode { .. }), "got {error}");
    }

    #[rstest]
    fn long_bodies_are_truncated_in_previews() {
        let body = "x".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }
}
