//! Loadmart API — library crate exposing modules for integration tests.

pub mod auth;
pub mod config;
pub mod error;
pub mod latency;
pub mod routes;
pub mod state;
