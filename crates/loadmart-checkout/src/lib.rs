//! Loadmart — Checkout bounded context.
//!
//! Owns the [`shop::Shop`] aggregate that ties the catalog, carts, sessions
//! and order ledger together, and implements the two state-changing
//! protocols that span them: checkout (validate, reserve, pay, then commit or
//! roll back) and the full store reset.

pub mod application;
pub mod domain;
pub mod ledger;
pub mod payment;
pub mod shop;
