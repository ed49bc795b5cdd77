// crates/blog-api-harness/src/seed.rs
// ============================================================================
// Module: Remote Seeding
// Description: Seed the remote API with posts and comment fixtures.
// Purpose: Give scenarios a known remote state before they assert on it.
// Dependencies: crate::{client, session, fixtures}
// ============================================================================

//! ## Overview
//! Seeding resets server-side collections and recreates them from fixture
//! payloads, so post identifiers start at 1 in fixture order. Each create
//! must succeed but its body is not inspected; scenarios assert on the
//! seeded state themselves.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::client::ApiClient;
use crate::client::ApiRequest;
use crate::endpoints;
use crate::error::HarnessError;
use crate::fixtures::FixtureRng;
use crate::fixtures::FixtureStore;
use crate::fixtures::generate_comment_data;
use crate::fixtures::generate_posts_data;
use crate::models::NewComment;
use crate::models::NewPost;
use crate::models::NewUser;
use crate::session::Session;
use crate::session::login;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of posts created before generating comment fixtures.
pub const COMMENT_SEED_POSTS: usize = 3;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Remote state produced by [`seed_comment_fixtures`].
#[derive(Debug, Clone)]
pub struct CommentSeed {
    /// Session issued while seeding; earlier sessions must not be reused.
    pub session: Session,
    /// Posts created remotely, with ids `1..=posts.len()`.
    pub posts: Vec<NewPost>,
    /// Generated comment payloads (not yet created remotely).
    pub comments: Vec<NewComment>,
}

// ============================================================================
// SECTION: Seeding
// ============================================================================

/// Logs in, resets posts, and creates `posts` in order.
///
/// Returns the fresh session issued by the login step.
///
/// # Errors
///
/// Returns [`HarnessError`] when any request fails.
pub async fn create_posts(
    client: &ApiClient,
    user: &NewUser,
    posts: &[NewPost],
) -> Result<Session, HarnessError> {
    let session = login(client, user).await?;
    client.send(ApiRequest::delete(endpoints::POSTS_RESET).bearer(&session)).await?;
    for post in posts {
        client.send(ApiRequest::post(endpoints::POSTS).bearer(&session).json(post)).await?;
    }
    Ok(session)
}

/// Resets comments, seeds three posts, and generates `count` comment fixtures.
///
/// Both `posts.json` and `comments.json` are rewritten. Comment `post_id`
/// values reference the freshly created posts.
///
/// # Errors
///
/// Returns [`HarnessError`] when a request or fixture write fails.
pub async fn seed_comment_fixtures(
    client: &ApiClient,
    session: &Session,
    user: &NewUser,
    store: &FixtureStore,
    rng: &mut FixtureRng,
    count: usize,
) -> Result<CommentSeed, HarnessError> {
    client.send(ApiRequest::delete(endpoints::COMMENTS_RESET).bearer(session)).await?;

    let posts = generate_posts_data(COMMENT_SEED_POSTS, rng);
    store.write_posts(&posts)?;
    let posts = store.read_posts()?;
    let session = create_posts(client, user, &posts).await?;

    let post_count = u64::try_from(posts.len()).unwrap_or(u64::MAX);
    let comments = generate_comment_data(count, post_count, rng);
    store.write_comments(&comments)?;

    Ok(CommentSeed {
        session,
        posts,
        comments,
    })
}
