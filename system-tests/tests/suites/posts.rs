// system-tests/tests/suites/posts.rs
// ============================================================================
// Module: Posts Suite
// Description: Create, list, fetch, update, and delete scenarios for posts.
// Purpose: Validate post CRUD against seeded fixtures and auth guards.
// Dependencies: system-tests helpers, blog-api-harness
// ============================================================================

//! ## Overview
//! Post scenarios against the blog API.
//! Invariants:
//! - After seeding N fixtures, the listing holds ids `1..=N` in fixture order.
//! - A deleted post disappears from both the detail and the listing views.

use std::ops::RangeInclusive;

use blog_api_harness::ApiClient;
use blog_api_harness::ApiRequest;
use blog_api_harness::ApiResponse;
use blog_api_harness::CreatedPost;
use blog_api_harness::FixtureRng;
use blog_api_harness::FixtureStore;
use blog_api_harness::HarnessError;
use blog_api_harness::NewPost;
use blog_api_harness::NewUser;
use blog_api_harness::Post;
use blog_api_harness::Session;
use blog_api_harness::check_unauthorized;
use blog_api_harness::create_posts;
use blog_api_harness::endpoints;
use blog_api_harness::expect_bad_request;
use blog_api_harness::expect_equal;
use blog_api_harness::expect_message;
use blog_api_harness::expect_not_found;
use blog_api_harness::expect_status;
use blog_api_harness::expect_success;
use blog_api_harness::failure;
use blog_api_harness::generate_posts_data;
use blog_api_harness::login;
use helpers::artifacts::TestReporter;
use helpers::harness::ApiTarget;
use helpers::harness::REQUEST_LOG_FILE;
use helpers::harness::SuiteContext;
use reqwest::Method;
use serde_json::json;

use crate::helpers;

/// Number of fixture posts seeded before the read scenarios.
const FIXTURE_POSTS: usize = 15;
/// Range for the id that never exists after seeding.
const MISSING_ID_RANGE: RangeInclusive<u64> = 16..=50;
/// Post updated and then deleted.
const TARGET_ID: u64 = 1;
/// Replacement title for the update scenario.
const UPDATED_TITLE: &str = "updated title";
/// Replacement content for the update scenario.
const UPDATED_CONTENT: &str = "updated content";

#[tokio::test(flavor = "multi_thread")]
async fn posts_suite() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("posts")?;
    let target = ApiTarget::resolve()?;
    let mut ctx = target.suite(&mut reporter)?;
    let outcome = run(&mut ctx, &mut reporter).await;
    let transcript = ctx.write_transcript(&reporter)?;
    reporter.conclude(outcome, vec![transcript, REQUEST_LOG_FILE.to_string()])
}

async fn run(ctx: &mut SuiteContext, reporter: &mut TestReporter) -> Result<(), HarnessError> {
    let client = &ctx.client;
    let user = &ctx.user;
    let missing_id = ctx.rng.random_range(MISSING_ID_RANGE);
    reporter.note(format!("missing post id: {missing_id}"));

    let session = reporter.scenario("setup: login", login(client, user)).await?;
    let fixtures = reporter
        .scenario("setup: generate post fixtures", generate_fixtures(&ctx.store, &mut ctx.rng))
        .await?;

    reporter
        .scenario(
            "reset: missing token is unauthorized",
            check_unauthorized(client, Method::DELETE, endpoints::POSTS_RESET),
        )
        .await?;

    // create
    reporter
        .scenario(
            "create: missing token is unauthorized",
            check_unauthorized(client, Method::POST, endpoints::POSTS),
        )
        .await?;
    reporter
        .scenario("create: empty body fails validation", create_requires_fields(client, &session))
        .await?;
    reporter
        .scenario("create: returns created post", create_returns_post(client, &session, &fixtures))
        .await?;

    // list
    reporter
        .scenario(
            "list: missing token is unauthorized",
            check_unauthorized(client, Method::GET, endpoints::POSTS),
        )
        .await?;
    let session = reporter
        .scenario(
            "list: returns seeded posts in order",
            list_matches_fixtures(client, user, &fixtures),
        )
        .await?;

    // get by id
    reporter
        .scenario(
            "get: missing token is unauthorized",
            check_unauthorized(client, Method::GET, &endpoints::post(900)),
        )
        .await?;
    reporter
        .scenario(
            "get: returns each seeded post",
            get_matches_fixtures(client, &session, &fixtures),
        )
        .await?;
    reporter
        .scenario("get: unknown id is not found", get_missing(client, &session, missing_id))
        .await?;

    // update
    reporter
        .scenario(
            "update: missing token is unauthorized",
            check_unauthorized(client, Method::PATCH, &endpoints::post(1234)),
        )
        .await?;
    reporter
        .scenario("update: unknown id is not found", update_missing(client, &session, missing_id))
        .await?;
    reporter
        .scenario(
            "update: wrong field types fail validation",
            update_rejects_types(client, &session, missing_id),
        )
        .await?;
    reporter
        .scenario("update: change is visible everywhere", update_succeeds(client, &session))
        .await?;

    // delete
    reporter
        .scenario(
            "delete: missing token is unauthorized",
            check_unauthorized(client, Method::DELETE, &endpoints::post(1232)),
        )
        .await?;
    reporter
        .scenario("delete: unknown id is not found", delete_missing(client, &session, missing_id))
        .await?;
    reporter.scenario("delete: removes the post", delete_succeeds(client, &session)).await?;
    reporter
        .scenario("delete: post is gone everywhere", deleted_post_is_gone(client, &session))
        .await?;
    Ok(())
}

#[allow(clippy::unused_async, reason = "Async signature lets setup run as a recorded scenario.")]
async fn generate_fixtures(
    store: &FixtureStore,
    rng: &mut FixtureRng,
) -> Result<Vec<NewPost>, HarnessError> {
    let posts = generate_posts_data(FIXTURE_POSTS, rng);
    store.write_posts(&posts)?;
    store.read_posts()
}

async fn create_requires_fields(client: &ApiClient, session: &Session) -> Result<(), HarnessError> {
    let request = ApiRequest::post(endpoints::POSTS).bearer(session).allow_failure();
    let response = client.send(request).await?;
    expect_bad_request(&response, &["title must be a string", "content must be a string"])
}

async fn create_returns_post(
    client: &ApiClient,
    session: &Session,
    fixtures: &[NewPost],
) -> Result<(), HarnessError> {
    let fixture = first_fixture(fixtures)?;
    let response =
        client.send(ApiRequest::post(endpoints::POSTS).bearer(session).json(fixture)).await?;
    expect_success(&response, 201)?;
    let post: CreatedPost = response.decode_data()?;
    expect_post_fields(&response, &post.title, &post.content, &fixture.title, &fixture.content)?;
    expect_equal(&response, "comments", &0, &post.comments.len())
}

/// Reseeds the fixtures and returns the session issued while seeding.
async fn list_matches_fixtures(
    client: &ApiClient,
    user: &NewUser,
    fixtures: &[NewPost],
) -> Result<Session, HarnessError> {
    let session = create_posts(client, user, fixtures).await?;
    let (response, posts) = list_posts(client, &session).await?;
    expect_equal(&response, "post count", &fixtures.len(), &posts.len())?;
    for ((index, fixture), post) in fixtures.iter().enumerate().zip(&posts) {
        let expected_id = u64::try_from(index).unwrap_or(u64::MAX).saturating_add(1);
        expect_equal(&response, "id", &expected_id, &post.id)?;
        expect_post_fields(
            &response,
            &post.title,
            &post.content,
            &fixture.title,
            &fixture.content,
        )?;
    }
    Ok(session)
}

async fn get_matches_fixtures(
    client: &ApiClient,
    session: &Session,
    fixtures: &[NewPost],
) -> Result<(), HarnessError> {
    for (id, fixture) in (1_u64..).zip(fixtures) {
        let response =
            client.send(ApiRequest::get(endpoints::post(id)).bearer(session)).await?;
        expect_status(&response, 200)?;
        let post: Post = response.decode_data()?;
        expect_post_fields(
            &response,
            &post.title,
            &post.content,
            &fixture.title,
            &fixture.content,
        )?;
    }
    Ok(())
}

async fn get_missing(client: &ApiClient, session: &Session, id: u64) -> Result<(), HarnessError> {
    let request = ApiRequest::get(endpoints::post(id)).bearer(session).allow_failure();
    expect_not_found(&client.send(request).await?)
}

async fn update_missing(
    client: &ApiClient,
    session: &Session,
    id: u64,
) -> Result<(), HarnessError> {
    let request = ApiRequest::patch(endpoints::post(id)).bearer(session).allow_failure();
    expect_not_found(&client.send(request).await?)
}

async fn update_rejects_types(
    client: &ApiClient,
    session: &Session,
    number: u64,
) -> Result<(), HarnessError> {
    let request = ApiRequest::patch(endpoints::post(TARGET_ID))
        .bearer(session)
        .json(&json!({ "title": false, "content": number }))
        .allow_failure();
    let response = client.send(request).await?;
    expect_bad_request(&response, &["title must be a string", "content must be a string"])
}

async fn update_succeeds(client: &ApiClient, session: &Session) -> Result<(), HarnessError> {
    let update = NewPost {
        title: UPDATED_TITLE.to_string(),
        content: UPDATED_CONTENT.to_string(),
    };
    let request = ApiRequest::patch(endpoints::post(TARGET_ID)).bearer(session).json(&update);
    let response = client.send(request).await?;
    expect_success(&response, 200)?;
    let updated: Post = response.decode_data()?;
    expect_updated(&response, &updated)?;

    let response =
        client.send(ApiRequest::get(endpoints::post(TARGET_ID)).bearer(session)).await?;
    expect_status(&response, 200)?;
    let fetched: Post = response.decode_data()?;
    expect_updated(&response, &fetched)?;

    let (response, posts) = list_posts(client, session).await?;
    let Some(listed) = posts.iter().find(|post| post.id == TARGET_ID) else {
        return Err(failure(
            &response,
            format!("post {TARGET_ID} in listing"),
            "absent".to_string(),
        ));
    };
    expect_updated(&response, listed)
}

async fn delete_missing(
    client: &ApiClient,
    session: &Session,
    id: u64,
) -> Result<(), HarnessError> {
    let request = ApiRequest::delete(endpoints::post(id)).bearer(session).allow_failure();
    expect_not_found(&client.send(request).await?)
}

async fn delete_succeeds(client: &ApiClient, session: &Session) -> Result<(), HarnessError> {
    let response =
        client.send(ApiRequest::delete(endpoints::post(TARGET_ID)).bearer(session)).await?;
    expect_success(&response, 200)?;
    expect_message(&response, "Post deleted successfully")
}

async fn deleted_post_is_gone(client: &ApiClient, session: &Session) -> Result<(), HarnessError> {
    let request = ApiRequest::get(endpoints::post(TARGET_ID)).bearer(session).allow_failure();
    expect_status(&client.send(request).await?, 404)?;

    let (response, posts) = list_posts(client, session).await?;
    if posts.iter().any(|post| post.id == TARGET_ID) {
        return Err(failure(
            &response,
            format!("no post {TARGET_ID} in listing"),
            "present".to_string(),
        ));
    }
    Ok(())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

async fn list_posts(
    client: &ApiClient,
    session: &Session,
) -> Result<(ApiResponse, Vec<Post>), HarnessError> {
    let response = client.send(ApiRequest::get(endpoints::POSTS).bearer(session)).await?;
    expect_success(&response, 200)?;
    let posts = response.decode_data()?;
    Ok((response, posts))
}

fn expect_post_fields(
    response: &ApiResponse,
    title: &str,
    content: &str,
    expected_title: &str,
    expected_content: &str,
) -> Result<(), HarnessError> {
    expect_equal(response, "title", expected_title, title)?;
    expect_equal(response, "content", expected_content, content)
}

fn expect_updated(response: &ApiResponse, post: &Post) -> Result<(), HarnessError> {
    expect_post_fields(response, &post.title, &post.content, UPDATED_TITLE, UPDATED_CONTENT)
}

fn first_fixture(fixtures: &[NewPost]) -> Result<&NewPost, HarnessError> {
    fixtures.first().ok_or_else(|| HarnessError::Fixture {
        path: "posts.json".to_string(),
        message: "no post fixtures generated".to_string(),
    })
}
