// crates/blog-api-harness/src/fixtures.rs
// ============================================================================
// Module: Fixture Generation
// Description: Randomized post/comment payloads and JSON fixture files.
// Purpose: Generate seed data as pure values and persist it separately.
// Dependencies: fake, rand, rand_chacha, serde_json
// ============================================================================

//! ## Overview
//! Generators are pure functions of a [`FixtureRng`]: the same seed always
//! yields the same payloads, so a failing run can be replayed by pinning the
//! seed. Persistence is a separate step through [`FixtureStore`], which writes
//! pretty JSON files that later scenarios read back.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::path::PathBuf;

use fake::Fake;
use fake::faker::lorem::raw::Paragraphs;
use fake::faker::lorem::raw::Words;
use fake::locales::EN;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::HarnessError;
use crate::models::NewComment;
use crate::models::NewPost;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Words per generated post title.
const POST_TITLE_WORDS: usize = 3;
/// Paragraphs per generated post body.
const POST_CONTENT_PARAGRAPHS: usize = 3;
/// Words per generated comment body.
const COMMENT_CONTENT_WORDS: usize = 5;

// ============================================================================
// SECTION: RNG
// ============================================================================

/// Seeded RNG for fixture generation.
#[derive(Debug, Clone)]
pub struct FixtureRng {
    /// Seed the generator was created from.
    seed: u64,
    /// Deterministic generator.
    rng: ChaCha8Rng,
}

impl FixtureRng {
    /// Creates a generator from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a generator from a random seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    /// Uses `seed` when present, otherwise a random seed.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// Returns the seed, for replaying a run.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws a value uniformly from an inclusive range.
    ///
    /// An empty range yields its start.
    pub fn random_range(&mut self, range: RangeInclusive<u64>) -> u64 {
        if range.is_empty() {
            return *range.start();
        }
        self.rng.random_range(range)
    }
}

// ============================================================================
// SECTION: Generators
// ============================================================================

/// Generates `count` randomized posts.
///
/// Titles are three lorem words; bodies are three lorem paragraphs.
#[must_use]
pub fn generate_posts_data(count: usize, rng: &mut FixtureRng) -> Vec<NewPost> {
    (0..count)
        .map(|_| NewPost {
            title: lorem_words(rng, POST_TITLE_WORDS),
            content: lorem_paragraphs(rng, POST_CONTENT_PARAGRAPHS),
        })
        .collect()
}

/// Generates `count` randomized comments.
///
/// Each `post_id` is drawn uniformly from `1..=post_count`; a zero
/// `post_count` is treated as one.
#[must_use]
pub fn generate_comment_data(
    count: usize,
    post_count: u64,
    rng: &mut FixtureRng,
) -> Vec<NewComment> {
    let upper = post_count.max(1);
    (0..count)
        .map(|_| NewComment {
            post_id: rng.random_range(1..=upper),
            content: lorem_words(rng, COMMENT_CONTENT_WORDS),
        })
        .collect()
}

/// Joins `count` lorem words with spaces.
fn lorem_words(rng: &mut FixtureRng, count: usize) -> String {
    let words: Vec<String> = Words(EN, count..count + 1).fake_with_rng(&mut rng.rng);
    words.join(" ")
}

/// Joins `count` lorem paragraphs with newlines.
fn lorem_paragraphs(rng: &mut FixtureRng, count: usize) -> String {
    let paragraphs: Vec<String> = Paragraphs(EN, count..count + 1).fake_with_rng(&mut rng.rng);
    paragraphs.join("\n")
}

// ============================================================================
// SECTION: Fixture Store
// ============================================================================

/// Fixture files known to the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureKind {
    /// Generated posts (`posts.json`).
    Posts,
    /// Generated comments (`comments.json`).
    Comments,
}

impl FixtureKind {
    /// Returns the fixture file name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Posts => "posts.json",
            Self::Comments => "comments.json",
        }
    }
}

/// Directory of JSON fixture files.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    /// Fixture directory.
    dir: PathBuf,
}

impl FixtureStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
        }
    }

    /// Returns the fixture directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of a fixture file.
    #[must_use]
    pub fn path(&self, kind: FixtureKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Writes a fixture, replacing any previous contents.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Fixture`] when serialization or the write fails.
    pub fn write<T: Serialize + ?Sized>(
        &self,
        kind: FixtureKind,
        value: &T,
    ) -> Result<PathBuf, HarnessError> {
        let path = self.path(kind);
        fs::create_dir_all(&self.dir).map_err(|err| fixture_error(&self.dir, err))?;
        let bytes = serde_json::to_vec_pretty(value).map_err(|err| fixture_error(&path, err))?;
        fs::write(&path, bytes).map_err(|err| fixture_error(&path, err))?;
        Ok(path)
    }

    /// Reads a fixture back.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Fixture`] when the file is missing or malformed.
    pub fn read<T: DeserializeOwned>(&self, kind: FixtureKind) -> Result<T, HarnessError> {
        let path = self.path(kind);
        let bytes = fs::read(&path).map_err(|err| fixture_error(&path, err))?;
        serde_json::from_slice(&bytes).map_err(|err| fixture_error(&path, err))
    }

    /// Writes `posts.json`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Fixture`] when the write fails.
    pub fn write_posts(&self, posts: &[NewPost]) -> Result<PathBuf, HarnessError> {
        self.write(FixtureKind::Posts, posts)
    }

    /// Reads `posts.json`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Fixture`] when the file is missing or malformed.
    pub fn read_posts(&self) -> Result<Vec<NewPost>, HarnessError> {
        self.read(FixtureKind::Posts)
    }

    /// Writes `comments.json`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Fixture`] when the write fails.
    pub fn write_comments(&self, comments: &[NewComment]) -> Result<PathBuf, HarnessError> {
        self.write(FixtureKind::Comments, comments)
    }

    /// Reads `comments.json`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Fixture`] when the file is missing or malformed.
    pub fn read_comments(&self) -> Result<Vec<NewComment>, HarnessError> {
        self.read(FixtureKind::Comments)
    }
}

/// Builds a fixture error for a path.
fn fixture_error(path: &Path, err: impl ToString) -> HarnessError {
    HarnessError::Fixture {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
