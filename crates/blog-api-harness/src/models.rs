// crates/blog-api-harness/src/models.rs
// ============================================================================
// Module: API Models
// Description: Request and response payloads for the blog API.
// Purpose: Give the remote entities typed shapes for fixtures and decoding.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! These types mirror what the remote API accepts and returns. None of them
//! is authoritative: the server owns every entity, and the harness only holds
//! transient copies for seeding and comparison.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Users
// ============================================================================

/// Default registration name.
pub const DEFAULT_USER_NAME: &str = "John Doe";
/// Default registration email.
pub const DEFAULT_USER_EMAIL: &str = "john@nest.test";
/// Default registration password.
pub const DEFAULT_USER_PASSWORD: &str = "Secret_123";

/// Registration payload for `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl Default for NewUser {
    fn default() -> Self {
        Self {
            name: DEFAULT_USER_NAME.to_string(),
            email: DEFAULT_USER_EMAIL.to_string(),
            password: DEFAULT_USER_PASSWORD.to_string(),
        }
    }
}

impl NewUser {
    /// Returns the login credentials for this user.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Login payload for `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// User as returned by `/auth/register` and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Login response data.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    /// Bearer token for authenticated requests.
    pub access_token: String,
}

// ============================================================================
// SECTION: Posts and Comments
// ============================================================================

/// Post payload for `POST /posts` and `PATCH /posts/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
}

/// Post as returned by the posts endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    /// Server-assigned identifier, sequential from 1 after a reset.
    pub id: u64,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Comments attached to the post, in creation order.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Post as echoed by `POST /posts`.
///
/// The create response carries no identifier; ids are only observable
/// through the read endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedPost {
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Comments attached at creation, always empty.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Comment payload for `POST /comments`, also echoed by its response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    /// Parent post identifier.
    pub post_id: u64,
    /// Comment body.
    pub content: String,
}

/// Comment as nested in post payloads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    /// Server-assigned identifier.
    pub id: u64,
    /// Parent post identifier when the server includes it.
    #[serde(default)]
    pub post_id: Option<u64>,
    /// Comment body.
    pub content: String,
}

// ============================================================================
// SECTION: Envelopes
// ============================================================================

/// Success envelope shared by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Success flag.
    pub success: bool,
    /// Optional human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload.
    pub data: T,
}
