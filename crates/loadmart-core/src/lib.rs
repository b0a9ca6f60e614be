//! Loadmart Core — shared domain abstractions.
//!
//! This crate defines the traits and types every storefront context depends
//! on: time, randomness, money, payment and the common error taxonomy. It
//! contains no state of its own.

pub mod clock;
pub mod command;
pub mod error;
pub mod money;
pub mod payment;
pub mod rng;
