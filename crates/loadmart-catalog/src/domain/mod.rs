//! Catalog domain types and rules.

pub mod catalog;
pub mod config;
pub mod product;
pub mod reservation;
