// crates/blog-api-harness/src/error.rs
// ============================================================================
// Module: Harness Errors
// Description: Error taxonomy for harness requests, assertions, and fixtures.
// Purpose: Attribute every scenario failure to the first broken step.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every helper returns [`HarnessError`]. Nothing is retried or recovered:
//! the first error aborts the calling scenario and carries enough context
//! (method, path, expectation) to identify the failing step.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::config::ConfigError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Errors raised by harness helpers.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The HTTP transport failed before a response arrived.
    #[error("{method} {path}: transport failure: {message}")]
    Http {
        /// HTTP method of the failed request.
        method: String,
        /// Request path relative to the base URL.
        path: String,
        /// Transport error description.
        message: String,
    },
    /// A request that must succeed returned a non-success status.
    #[error("{method} {path}: unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP method of the request.
        method: String,
        /// Request path relative to the base URL.
        path: String,
        /// Observed status code.
        status: u16,
        /// Response body rendered as JSON text.
        body: String,
    },
    /// A response payload did not match the expected shape.
    #[error("{context}: invalid json: {message}")]
    Decode {
        /// Description of what was being decoded.
        context: String,
        /// Decoder error description.
        message: String,
    },
    /// A response assertion failed.
    #[error("{method} {path}: expected {expected}, observed {observed}")]
    Assertion {
        /// HTTP method of the asserted request.
        method: String,
        /// Request path relative to the base URL.
        path: String,
        /// Expected condition.
        expected: String,
        /// Observed value.
        observed: String,
    },
    /// A fixture file could not be written or read.
    #[error("fixture {path}: {message}")]
    Fixture {
        /// Fixture file path.
        path: String,
        /// I/O or JSON error description.
        message: String,
    },
}

impl HarnessError {
    /// Builds a decode error for the given context.
    pub(crate) fn decode(context: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
