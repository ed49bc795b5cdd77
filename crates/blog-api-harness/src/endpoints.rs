// crates/blog-api-harness/src/endpoints.rs
// ============================================================================
// Module: API Endpoints
// Description: Paths consumed from the remote blog API.
// Purpose: Keep endpoint paths in one place for helpers and suites.
// Dependencies: none
// ============================================================================

//! Endpoint paths relative to the configured base URL.

/// `POST` registers a user.
pub const AUTH_REGISTER: &str = "/auth/register";
/// `DELETE` clears all users.
pub const AUTH_RESET: &str = "/auth/reset";
/// `POST` exchanges credentials for a bearer token.
pub const AUTH_LOGIN: &str = "/auth/login";
/// `GET` returns the authenticated user.
pub const AUTH_ME: &str = "/auth/me";
/// `GET` lists posts, `POST` creates one.
pub const POSTS: &str = "/posts";
/// `DELETE` clears all posts.
pub const POSTS_RESET: &str = "/posts/reset";
/// `POST` creates a comment.
pub const COMMENTS: &str = "/comments";
/// `DELETE` clears all comments.
pub const COMMENTS_RESET: &str = "/comments/reset";

/// Returns the path for a single post.
#[must_use]
pub fn post(id: u64) -> String {
    format!("{POSTS}/{id}")
}

/// Returns the path for a single comment.
#[must_use]
pub fn comment(id: u64) -> String {
    format!("{COMMENTS}/{id}")
}
