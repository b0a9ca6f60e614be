//! Application layer: login and token resolution.

pub mod command_handlers;
pub mod query_handlers;
