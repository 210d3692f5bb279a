//! # HMMS Testing Utils
//!
//! Shared testing utilities for the preventive-maintenance engine.
//! This crate provides in-memory mock implementations of every repository
//! and notification-channel trait, plus test data builders, so unit tests
//! run without a database or external services.
//!
//! ## Usage
//!
//! Add this crate as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! hmms-testing-utils = { path = "../testing-utils" }
//! ```

pub mod builders;
pub mod mocks;

pub use builders::*;
pub use mocks::*;
