// crates/blog-api-harness/src/lib.rs
// ============================================================================
// Module: Blog API Harness Library
// Description: Public API surface for the blog API end-to-end harness.
// Purpose: Expose request helpers, assertions, fixtures, and seeding flows.
// Dependencies: crate::{client, assertions, session, fixtures, seed, config}
// ============================================================================

//! ## Overview
//! Black-box helpers for driving a remote blog API (auth, posts, comments)
//! over HTTP. The crate owns no data: every entity lives on the remote server
//! and is observed through JSON responses.
//!
//! The layers are deliberately thin:
//! - [`client`] issues requests with explicit authorization and records a
//!   transcript of every exchange.
//! - [`assertions`] checks response shapes and returns descriptive errors.
//! - [`session`] bootstraps a bearer [`Session`] through reset, register, and
//!   login calls.
//! - [`fixtures`] generates randomized payloads and persists them as JSON.
//! - [`seed`] seeds the remote server with posts and comment fixtures.
//!
//! Failures never retry. Any unexpected status aborts the calling scenario
//! through [`HarnessError`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod assertions;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod fixtures;
pub mod log;
pub mod models;
pub mod seed;
pub mod session;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use assertions::check_unauthorized;
pub use assertions::expect_bad_request;
pub use assertions::expect_equal;
pub use assertions::expect_failure_message;
pub use assertions::expect_field_absent;
pub use assertions::expect_message;
pub use assertions::expect_not_found;
pub use assertions::expect_status;
pub use assertions::expect_success;
pub use assertions::expect_unauthorized;
pub use assertions::failure;
pub use client::ApiClient;
pub use client::ApiRequest;
pub use client::ApiResponse;
pub use client::Authorization;
pub use client::TranscriptEntry;
pub use config::ConfigError;
pub use config::HarnessConfig;
pub use error::HarnessError;
pub use fixtures::FixtureKind;
pub use fixtures::FixtureRng;
pub use fixtures::FixtureStore;
pub use fixtures::generate_comment_data;
pub use fixtures::generate_posts_data;
pub use models::Comment;
pub use models::CreatedPost;
pub use models::Credentials;
pub use models::Envelope;
pub use models::NewComment;
pub use models::NewPost;
pub use models::NewUser;
pub use models::Post;
pub use models::User;
pub use seed::COMMENT_SEED_POSTS;
pub use seed::CommentSeed;
pub use seed::create_posts;
pub use seed::seed_comment_fixtures;
pub use session::Session;
pub use session::login;
pub use session::register;
pub use session::reset_users;
