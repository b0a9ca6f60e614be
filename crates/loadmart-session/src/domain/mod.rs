//! Session domain types.

pub mod commands;
pub mod session;
