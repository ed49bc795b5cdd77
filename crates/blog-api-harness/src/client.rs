// crates/blog-api-harness/src/client.rs
// ============================================================================
// Module: API HTTP Client
// Description: Request builder and client for the remote blog API.
// Purpose: Issue requests with explicit authorization and capture transcripts.
// Dependencies: reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! [`ApiClient`] sends one [`ApiRequest`] at a time and returns an
//! [`ApiResponse`] holding the status and the decoded JSON body.
//!
//! Requests fail on non-2xx statuses unless [`ApiRequest::allow_failure`] is
//! set. Negative scenarios opt out explicitly and assert on the response.
//! Authorization is never ambient: a request carries a bearer token only when
//! it was given a [`Session`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

use reqwest::Client;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::log::NoopRequestLog;
use crate::log::RequestEvent;
use crate::log::RequestEventParams;
use crate::log::RequestLogSink;
use crate::session::Session;

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Authorization header policy for a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Authorization {
    /// Send no Authorization header.
    #[default]
    Omitted,
    /// Send `Authorization: Bearer <token>`.
    Bearer(String),
}

/// A single request against the API.
#[derive(Debug)]
pub struct ApiRequest {
    /// HTTP method.
    method: Method,
    /// Path relative to the base URL.
    path: String,
    /// Authorization header policy.
    authorization: Authorization,
    /// JSON body, or the serialization error to surface on send.
    body: Option<Result<Value, String>>,
    /// Whether a non-2xx status is an error.
    fail_on_status: bool,
}

impl ApiRequest {
    /// Creates a request with no body and no authorization.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            authorization: Authorization::Omitted,
            body: None,
            fail_on_status: true,
        }
    }

    /// Creates a `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a `POST` request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a `PATCH` request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Creates a `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attaches the session's bearer token.
    #[must_use]
    pub fn bearer(mut self, session: &Session) -> Self {
        self.authorization = Authorization::Bearer(session.access_token().to_string());
        self
    }

    /// Removes any Authorization header from the request.
    #[must_use]
    pub fn without_authorization(mut self) -> Self {
        self.authorization = Authorization::Omitted;
        self
    }

    /// Attaches a JSON body. Serialization errors surface from [`ApiClient::send`].
    #[must_use]
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_value(body).map_err(|err| err.to_string()));
        self
    }

    /// Returns non-2xx responses instead of failing.
    #[must_use]
    pub const fn allow_failure(mut self) -> Self {
        self.fail_on_status = false;
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the authorization policy.
    #[must_use]
    pub const fn authorization(&self) -> &Authorization {
        &self.authorization
    }
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Response observed for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP method of the originating request.
    method: String,
    /// Path of the originating request.
    path: String,
    /// Response status code.
    status: u16,
    /// Response body as JSON (`Null` when empty, a string when not JSON).
    body: Value,
}

impl ApiResponse {
    /// Builds a response record.
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        status: u16,
        body: Value,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            status,
            body,
        }
    }

    /// Returns the originating HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the originating path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw JSON body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Returns `body.message` when it is a string.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    /// Returns `body.message` as a list of strings.
    ///
    /// A single string message yields a one-element list.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        match self.body.get("message") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(message)) => vec![message.as_str()],
            _ => Vec::new(),
        }
    }

    /// Returns `body.error`.
    #[must_use]
    pub fn error_label(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    /// Returns `body.success`.
    #[must_use]
    pub fn success(&self) -> Option<bool> {
        self.body.get("success").and_then(Value::as_bool)
    }

    /// Returns `body.data` when present (including an explicit `null`).
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }

    /// Decodes `body.data` into a typed payload.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Decode`] when `data` is missing or mismatched.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T, HarnessError> {
        let data = self.data().cloned().ok_or_else(|| {
            HarnessError::decode(self.context(), "response has no data field")
        })?;
        serde_json::from_value(data).map_err(|err| HarnessError::decode(self.context(), err))
    }

    /// Decodes the whole body into a typed payload.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Decode`] when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, HarnessError> {
        serde_json::from_value(self.body.clone())
            .map_err(|err| HarnessError::decode(self.context(), err))
    }

    /// Returns a `METHOD path` label for error context.
    fn context(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

// ============================================================================
// SECTION: Transcript
// ============================================================================

/// One request/response exchange recorded by the client.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// Client-local sequence number, starting at 1.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Whether a bearer token was attached.
    pub authorized: bool,
    /// Request body, when one was sent.
    pub request: Option<Value>,
    /// Response status, when a response arrived.
    pub status: Option<u16>,
    /// Response body (`Null` on transport failure).
    pub response: Value,
    /// Transport error, when no response arrived.
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// HTTP client for the blog API with transcript capture.
#[derive(Clone)]
pub struct ApiClient {
    /// Base URL of the API under test.
    base_url: Url,
    /// Underlying HTTP client.
    client: Client,
    /// Request event sink.
    log: Arc<dyn RequestLogSink>,
    /// Recorded exchanges.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
    /// Request sequence counter shared across clones.
    sequence: Arc<AtomicU64>,
}

impl ApiClient {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the URL is invalid or the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HarnessError> {
        let base_url = Url::parse(base_url).map_err(|err| {
            HarnessError::Config(crate::config::ConfigError::Invalid(format!(
                "invalid base url {base_url}: {err}"
            )))
        })?;
        let client = Client::builder().timeout(timeout).build().map_err(|err| {
            HarnessError::Http {
                method: "-".to_string(),
                path: "-".to_string(),
                message: format!("failed to build http client: {err}"),
            }
        })?;
        Ok(Self {
            base_url,
            client,
            log: Arc::new(NoopRequestLog),
            transcript: Arc::new(Mutex::new(Vec::new())),
            sequence: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Creates a client from harness configuration, including its request log.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the configuration is invalid.
    pub fn from_config(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let base_url = config.target.parsed_base_url()?;
        let log = config.request_log()?;
        Ok(Self::new(base_url.as_str(), config.target.timeout())?.with_request_log(log))
    }

    /// Replaces the request event sink.
    #[must_use]
    pub fn with_request_log(mut self, log: Arc<dyn RequestLogSink>) -> Self {
        self.log = log;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Sends a request and waits for its response.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Http`] on transport failure and
    /// [`HarnessError::UnexpectedStatus`] on a non-2xx status unless the
    /// request allows failure.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HarnessError> {
        let ApiRequest {
            method,
            path,
            authorization,
            body,
            fail_on_status,
        } = request;
        let method_label = method.as_str().to_string();
        let body = body
            .transpose()
            .map_err(|err| HarnessError::decode(format!("{method_label} {path} request"), err))?;

        let mut http_request = self.client.request(method, self.url_for(&path));
        let authorized = match &authorization {
            Authorization::Bearer(token) => {
                http_request = http_request.bearer_auth(token);
                true
            }
            Authorization::Omitted => false,
        };
        if let Some(value) = &body {
            http_request = http_request.json(value);
        }

        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        let started = Instant::now();
        let outcome = match http_request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                response.text().await.map(|text| (status, parse_body(&text)))
            }
            Err(err) => Err(err),
        };
        let duration_ms = started.elapsed().as_millis();

        let (status, response_body) = match outcome {
            Ok(pair) => pair,
            Err(err) => {
                let message = err.to_string();
                self.record(
                    RequestEventParams {
                        sequence,
                        method: method_label.clone(),
                        path: path.clone(),
                        status: None,
                        error: Some(message.clone()),
                        duration_ms,
                        authorized,
                    },
                    body,
                    Value::Null,
                );
                return Err(HarnessError::Http {
                    method: method_label,
                    path,
                    message,
                });
            }
        };

        self.record(
            RequestEventParams {
                sequence,
                method: method_label.clone(),
                path: path.clone(),
                status: Some(status),
                error: None,
                duration_ms,
                authorized,
            },
            body,
            response_body.clone(),
        );

        if fail_on_status && !(200..300).contains(&status) {
            return Err(HarnessError::UnexpectedStatus {
                method: method_label,
                path,
                status,
                body: response_body.to_string(),
            });
        }
        Ok(ApiResponse::new(method_label, path, status, response_body))
    }

    /// Joins the base URL and a request path, preserving any base path prefix.
    fn url_for(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Emits the request event and appends the transcript entry.
    fn record(&self, params: RequestEventParams, request: Option<Value>, response: Value) {
        let entry = TranscriptEntry {
            sequence: params.sequence,
            method: params.method.clone(),
            path: params.path.clone(),
            authorized: params.authorized,
            request,
            status: params.status,
            response,
            error: params.error.clone(),
        };
        self.log.record(&RequestEvent::new(params));
        if let Ok(mut guard) = self.transcript.lock() {
            guard.push(entry);
        }
    }
}

/// Parses a response body, keeping non-JSON text as a string value.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
