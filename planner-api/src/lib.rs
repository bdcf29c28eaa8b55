//! # Smart Planner Web Server Library
//!
//! HTTP front end for the task planner: accounts, sessions and
//! per-user task lists with completion stats.
//!
//! ## Modules
//!
//! - `app`: Application state, session gate and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `flash`: One-shot messages carried across redirects
//! - `middleware`: Response middleware
//! - `routes`: Route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod flash;
pub mod middleware;
pub mod routes;
