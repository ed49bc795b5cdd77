// crates/blog-api-harness/src/log.rs
// ============================================================================
// Module: Request Logging
// Description: Structured request events for harness HTTP exchanges.
// Purpose: Emit redacted JSON-line logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every request issued by [`crate::ApiClient`] produces one [`RequestEvent`].
//! Sinks route events to stderr, an append-only file, or nowhere. Events never
//! carry bearer tokens or request/response bodies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Request outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// A response arrived (any status).
    Response,
    /// The transport failed before a response arrived.
    TransportError,
}

/// Harness request event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Client-local request sequence number.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Request path relative to the base URL.
    pub path: String,
    /// Request outcome.
    pub outcome: RequestOutcome,
    /// Response status when a response arrived.
    pub status: Option<u16>,
    /// Transport error description when no response arrived.
    pub error: Option<String>,
    /// Wall-clock request duration in milliseconds.
    pub duration_ms: u128,
    /// Whether an Authorization header was sent.
    pub authorized: bool,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

/// Inputs required to construct a request event.
pub struct RequestEventParams {
    /// Client-local request sequence number.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Request path relative to the base URL.
    pub path: String,
    /// Response status when a response arrived.
    pub status: Option<u16>,
    /// Transport error description when no response arrived.
    pub error: Option<String>,
    /// Wall-clock request duration in milliseconds.
    pub duration_ms: u128,
    /// Whether an Authorization header was sent.
    pub authorized: bool,
}

impl RequestEvent {
    /// Creates a new request event with a consistent timestamp.
    #[must_use]
    pub fn new(params: RequestEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        let outcome = if params.status.is_some() {
            RequestOutcome::Response
        } else {
            RequestOutcome::TransportError
        };
        Self {
            event: "api_request",
            timestamp_ms,
            sequence: params.sequence,
            method: params.method,
            path: params.path,
            outcome,
            status: params.status,
            error: params.error,
            duration_ms: params.duration_ms,
            authorized: params.authorized,
            redaction: "metadata_only",
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for harness request events.
pub trait RequestLogSink: Send + Sync {
    /// Record a request event.
    fn record(&self, event: &RequestEvent);
}

/// Request log sink that writes JSON lines to stderr.
pub struct StderrRequestLog;

impl RequestLogSink for StderrRequestLog {
    fn record(&self, event: &RequestEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Request log sink that appends JSON lines to a file.
pub struct FileRequestLog {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileRequestLog {
    /// Opens the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RequestLogSink for FileRequestLog {
    fn record(&self, event: &RequestEvent) {
        let Ok(payload) = serde_json::to_string(event) else {
            return;
        };
        if let Ok(mut guard) = self.file.lock() {
            let _ = writeln!(guard, "{payload}");
        }
    }
}

/// Request log sink that discards events.
pub struct NoopRequestLog;

impl RequestLogSink for NoopRequestLog {
    fn record(&self, _event: &RequestEvent) {}
}
