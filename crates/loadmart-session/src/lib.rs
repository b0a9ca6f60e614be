//! Loadmart — Session bounded context.
//!
//! Issues opaque session tokens on login and resolves them back to a user
//! identity for the cart and checkout endpoints. Sessions never expire; they
//! are dropped only by a store reset.

pub mod application;
pub mod domain;
pub mod store;
