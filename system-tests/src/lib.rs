// system-tests/src/lib.rs
// ============================================================================
// Module: Blog API System Tests Library
// Description: Shared configuration for the blog API scenario suites.
// Purpose: Provide typed environment settings to the system-test binaries.
// Dependencies: blog-api-harness
// ============================================================================

//! ## Overview
//! This crate hosts the environment-backed configuration shared by the
//! scenario suites in `system-tests/tests`. The suites themselves live in
//! feature-gated test binaries.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
