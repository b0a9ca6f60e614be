//! Loadmart — Catalog bounded context.
//!
//! Owns the authoritative stock, price and purchase-count state of every
//! product. Stock only changes through a [`domain::reservation::Reservation`]
//! taken while holding the store's exclusive section.

pub mod application;
pub mod domain;
pub mod store;
