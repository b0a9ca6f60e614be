//! Cart domain types and rules.

pub mod cart;
pub mod commands;
