//! Application layer: checkout, reset and reporting.

pub mod command_handlers;
pub mod query_handlers;
