//! # Smart Planner Shared Library
//!
//! Domain logic for the Smart Planner task tracker, used by the API server
//! and its integration tests.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, credential checks and session tokens
//! - `db`: connection pool and migrations
//! - `models`: users and tasks
//! - `stats`: per-category completion percentages

pub mod auth;
pub mod db;
pub mod models;
pub mod stats;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
