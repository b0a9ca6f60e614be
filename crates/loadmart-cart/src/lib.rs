//! Loadmart — Cart bounded context.
//!
//! Owns every user's pending line items. Reads the catalog to pre-check
//! stock when items are added but never mutates it; the authoritative check
//! happens again at checkout.

pub mod application;
pub mod book;
pub mod domain;
