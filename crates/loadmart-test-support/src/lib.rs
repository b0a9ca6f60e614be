//! Shared test mocks and utilities for the Loadmart storefront.

mod clock;
mod payment;
mod rng;

pub use clock::{FixedClock, fixed_now};
pub use payment::{ApprovingPaymentGateway, DecliningPaymentGateway, RecordingPaymentGateway};
pub use rng::{MockRng, SequenceRng};
