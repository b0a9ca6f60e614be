//! Fixed-point currency helpers built on `rust_decimal`.
//!
//! Prices are created from whole cents so they are exact; totals are always
//! rounded to [`CURRENCY_DECIMAL_PLACES`] with half-away-from-zero rounding.

use rust_decimal::prelude::*;

/// Number of fractional digits kept for currency amounts.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Builds an exact currency amount from a number of cents.
#[must_use]
pub fn from_cents(cents: u32) -> Decimal {
    Decimal::new(i64::from(cents), CURRENCY_DECIMAL_PLACES)
}

/// Rounds an amount to currency precision.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Price of `quantity` units at `unit_price`.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sums `(unit_price, quantity)` pairs and rounds the result.
pub fn total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, u32)>,
{
    round_currency(
        lines
            .into_iter()
            .map(|(price, quantity)| line_total(price, quantity))
            .sum(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_is_exact() {
        assert_eq!(from_cents(1050), Decimal::new(105, 1));
        assert_eq!(from_cents(1050).to_string(), "10.50");
    }

    #[test]
    fn test_total_sums_lines() {
        let lines = vec![(from_cents(1000), 2), (from_cents(550), 1)];

        assert_eq!(total(lines), from_cents(2550));
    }

    #[test]
    fn test_total_of_nothing_is_zero() {
        assert_eq!(total(Vec::new()), Decimal::ZERO);
    }

    #[test]
    fn test_round_currency_rounds_midpoint_away_from_zero() {
        assert_eq!(round_currency(Decimal::new(12345, 3)), from_cents(1235));
    }
}
