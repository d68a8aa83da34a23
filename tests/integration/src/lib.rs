//! Integration test utilities for the clip vote subsystem
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API over the in-memory storage backend.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
