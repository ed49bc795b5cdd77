// crates/blog-api-harness/src/session.rs
// ============================================================================
// Module: Session Bootstrapping
// Description: User reset, registration, and login helpers.
// Purpose: Produce an explicit bearer session for authenticated scenarios.
// Dependencies: crate::client, crate::models
// ============================================================================

//! ## Overview
//! [`login`] guarantees a clean registration state, registers the configured
//! user, and returns the issued token as a [`Session`] value. The session is
//! passed to every authenticated request; calling [`login`] again yields a
//! new session that callers must use from then on.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::client::ApiClient;
use crate::client::ApiRequest;
use crate::client::ApiResponse;
use crate::endpoints;
use crate::error::HarnessError;
use crate::models::Envelope;
use crate::models::LoginData;
use crate::models::NewUser;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Bearer session returned by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque access token.
    access_token: String,
}

impl Session {
    /// Wraps an access token.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Returns the access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("access_token", &"<redacted>").finish()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Clears every user record on the server.
///
/// # Errors
///
/// Returns [`HarnessError`] when the request fails.
pub async fn reset_users(client: &ApiClient) -> Result<(), HarnessError> {
    client.send(ApiRequest::delete(endpoints::AUTH_RESET)).await?;
    Ok(())
}

/// Registers a user and returns the raw response.
///
/// # Errors
///
/// Returns [`HarnessError`] when the request fails or returns a non-2xx status.
pub async fn register(client: &ApiClient, user: &NewUser) -> Result<ApiResponse, HarnessError> {
    client.send(ApiRequest::post(endpoints::AUTH_REGISTER).json(user)).await
}

/// Resets users, registers `user`, logs in, and returns the issued session.
///
/// The three requests run strictly in sequence.
///
/// # Errors
///
/// Returns [`HarnessError`] when any step fails; login must succeed for
/// dependent scenarios to run.
pub async fn login(client: &ApiClient, user: &NewUser) -> Result<Session, HarnessError> {
    reset_users(client).await?;
    register(client, user).await?;
    let response =
        client.send(ApiRequest::post(endpoints::AUTH_LOGIN).json(&user.credentials())).await?;
    let envelope: Envelope<LoginData> = response.decode()?;
    Ok(Session::new(envelope.data.access_token))
}
