//! Checkout domain types.

pub mod commands;
pub mod order;
pub mod phase;
