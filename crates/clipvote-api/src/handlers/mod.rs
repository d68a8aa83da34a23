//! HTTP request handlers
//!
//! Handlers organized by domain: vote submission and queries, admin
//! remediation, and health probes.

pub mod admin;
pub mod health;
pub mod votes;
