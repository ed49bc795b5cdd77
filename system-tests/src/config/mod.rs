// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Centralized configuration for blog API system tests.
// Purpose: Provide typed access to test environment settings and defaults.
// Dependencies: blog-api-harness
// ============================================================================

//! ## Overview
//! System-test configuration is read from environment variables and layered
//! over the harness TOML configuration for reuse across test helpers.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
pub use env::read_env_strict;
