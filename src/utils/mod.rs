//! Utils module - Shared utilities and helpers
//!
//! Helpers used across the api, core and cli layers.

/// reqwest error conversion with endpoint context
pub mod error_helpers;

/// Verbose output and log subscriber setup
pub mod logging;

/// Display-width aware text helpers
pub mod text;

/// Input validation and normalization
pub mod validation;
