// crates/blog-api-harness/src/assertions.rs
// ============================================================================
// Module: Response Assertions
// Description: Shape checks for the API's success and error envelopes.
// Purpose: Share the validation, auth, and not-found checks across suites.
// Dependencies: crate::client
// ============================================================================

//! ## Overview
//! Assertions return [`HarnessError::Assertion`] instead of panicking so that
//! suite runners can record which scenario broke before aborting.
//!
//! Envelopes checked here:
//! - validation: `400 {error: "Bad Request", message: [..]}`
//! - auth: `401 {message: "Unauthorized"}`
//! - not found: `404 {success: false, data: null}`

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use reqwest::Method;
use serde_json::Value;

use crate::client::ApiClient;
use crate::client::ApiRequest;
use crate::client::ApiResponse;
use crate::error::HarnessError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Error label of validation failures.
pub const BAD_REQUEST_LABEL: &str = "Bad Request";
/// Message of authentication failures.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

// ============================================================================
// SECTION: Assertions
// ============================================================================

/// Asserts the response status.
///
/// # Errors
///
/// Returns [`HarnessError::Assertion`] on mismatch.
pub fn expect_status(response: &ApiResponse, status: u16) -> Result<(), HarnessError> {
    if response.status() == status {
        return Ok(());
    }
    Err(failure(response, format!("status {status}"), format!("status {}", response.status())))
}

/// Asserts the status and `success == true`.
///
/// # Errors
///
/// Returns [`HarnessError::Assertion`] on mismatch.
pub fn expect_success(response: &ApiResponse, status: u16) -> Result<(), HarnessError> {
    expect_status(response, status)?;
    expect_success_flag(response, true)
}

/// Asserts a validation failure carrying every expected message.
///
/// Order does not matter and extra server messages are allowed.
///
/// # Errors
///
/// Returns [`HarnessError::Assertion`] on mismatch.
pub fn expect_bad_request(response: &ApiResponse, expected: &[&str]) -> Result<(), HarnessError> {
    expect_status(response, 400)?;
    if response.error_label() != Some(BAD_REQUEST_LABEL) {
        return Err(failure(
            response,
            format!("error {}", quoted(BAD_REQUEST_LABEL)),
            render(response.body().get("error")),
        ));
    }
    let messages = response.messages();
    for message in expected {
        if !messages.contains(message) {
            return Err(failure(
                response,
                format!("message list containing {}", quoted(message)),
                Value::from(messages.clone()).to_string(),
            ));
        }
    }
    Ok(())
}

/// Asserts an authentication failure.
///
/// # Errors
///
/// Returns [`HarnessError::Assertion`] on mismatch.
pub fn expect_unauthorized(response: &ApiResponse) -> Result<(), HarnessError> {
    expect_status(response, 401)?;
    expect_message(response, UNAUTHORIZED_MESSAGE)
}

/// Asserts a not-found envelope with `success == false` and `data == null`.
///
/// # Errors
///
/// Returns [`HarnessError::Assertion`] on mismatch.
pub fn expect_not_found(response: &ApiResponse) -> Result<(), HarnessError> {
    expect_status(response, 404)?;
    expect_success_flag(response, false)?;
    match response.data() {
        Some(Value::Null) => Ok(()),
        other => Err(failure(response, "data null".to_string(), render(other))),
    }
}

/// Asserts a failure envelope with an exact message.
///
/// # Errors
///
/// Returns [`HarnessError::Assertion`] on mismatch.
pub fn expect_failure_message(
    response: &ApiResponse,
    status: u16,
    message: &str,
) -> Result<(), HarnessError> {
    expect_status(response, status)?;
    expect_success_flag(response, false)?;
    expect_message(response, message)
}

/// Asserts `body.message` equals `message`.
///
/// # Errors
///
/// Returns [`HarnessError::Assertion`] on mismatch.
pub fn expect_message(response: &ApiResponse, message: &str) -> Result<(), HarnessError> {
    if response.message() == Some(message) {
        return Ok(());
    }
    Err(failure(
        response,
        format!("message {}", quoted(message)),
        render(response.body().get("message")),
    ))
}

/// Asserts an observed value equals the expected one.
///
/// # Errors
///
/// Returns [`HarnessError::Assertion`] naming `field` on mismatch.
pub fn expect_equal<T: PartialEq + fmt::Display + ?Sized>(
    response: &ApiResponse,
    field: &str,
    expected: &T,
    observed: &T,
) -> Result<(), HarnessError> {
    if expected == observed {
        return Ok(());
    }
    Err(failure(response, format!("{field} {expected}"), format!("{field} {observed}")))
}

/// Asserts `data` carries no `field`, e.g. a password.
///
/// # Errors
///
/// Returns [`HarnessError::Assertion`] when the field is present.
pub fn expect_field_absent(response: &ApiResponse, field: &str) -> Result<(), HarnessError> {
    match response.data().and_then(|data| data.get(field)) {
        None => Ok(()),
        Some(value) => Err(failure(response, format!("no {field} field"), value.to_string())),
    }
}

/// Sends `method path` with no Authorization header and asserts a 401.
///
/// # Errors
///
/// Returns [`HarnessError`] when the request fails or the assertion does not hold.
pub async fn check_unauthorized(
    client: &ApiClient,
    method: Method,
    path: &str,
) -> Result<(), HarnessError> {
    let request = ApiRequest::new(method, path).without_authorization().allow_failure();
    let response = client.send(request).await?;
    expect_unauthorized(&response)
}

/// Builds an assertion failure for a response.
#[must_use]
pub fn failure(response: &ApiResponse, expected: String, observed: String) -> HarnessError {
    HarnessError::Assertion {
        method: response.method().to_string(),
        path: response.path().to_string(),
        expected,
        observed,
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Asserts `body.success` equals `expected`.
fn expect_success_flag(response: &ApiResponse, expected: bool) -> Result<(), HarnessError> {
    if response.success() == Some(expected) {
        return Ok(());
    }
    Err(failure(response, format!("success {expected}"), render(response.body().get("success"))))
}

/// Renders a string as a JSON literal.
fn quoted(value: &str) -> String {
    Value::from(value).to_string()
}

/// Renders an optional JSON value for error output.
fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "<missing>".to_string(), Value::to_string)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
