//! Money formatting utilities using rust_decimal for precision
//!
//! Monetary values enter the payload as strings with exactly two decimal
//! places and `.` as the separator regardless of locale. All arithmetic is
//! done on `Decimal`; `f64` appears only where a wire field is a raw
//! number.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert an amount in minor units (cents) to a `Decimal` in major units.
#[inline]
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, DECIMAL_PLACES)
}

/// Convert a major-unit amount to minor units (cents), rounded half-up.
#[inline]
pub fn to_cents(value: Decimal) -> i64 {
    (value * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// Convert a `Decimal` to `f64`, rounded to 2 decimal places.
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Format a major-unit amount with exactly two decimals, `.` separator.
pub fn format_amount(value: Decimal) -> String {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    rounded.to_string()
}

/// Format an amount in minor units (cents) as a major-unit string,
/// e.g. `10050` becomes `"100.50"`.
pub fn format_cents(cents: i64) -> String {
    format_amount(cents_to_decimal(cents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(10050), "100.50");
        assert_eq!(format_cents(100), "1.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(0), "0.00");
    }

    #[test]
    fn test_format_cents_negative() {
        assert_eq!(format_cents(-995), "-9.95");
    }

    #[test]
    fn test_format_amount_pads_to_two_decimals() {
        assert_eq!(format_amount(Decimal::from(120)), "120.00");
        assert_eq!(format_amount(Decimal::new(1205, 1)), "120.50");
    }

    #[test]
    fn test_format_amount_rounds_half_up() {
        // 0.005 rounds up, 0.004 rounds down
        assert_eq!(format_amount(Decimal::new(5, 3)), "0.01");
        assert_eq!(format_amount(Decimal::new(4, 3)), "0.00");
        // Six-decimal catalog prices collapse cleanly
        assert_eq!(format_amount(Decimal::new(99_995_000, 6)), "100.00");
    }

    #[test]
    fn test_to_cents_round_trip() {
        assert_eq!(to_cents(Decimal::new(10050, 2)), 10050);
        assert_eq!(to_cents(Decimal::new(1, 0)), 100);
        // Sub-cent amounts round half-up
        assert_eq!(to_cents(Decimal::new(10_055, 3)), 1006);
    }

    #[test]
    fn test_to_f64_rounds_to_two_decimals() {
        assert_eq!(to_f64(Decimal::new(216_923, 4)), 21.69);
        assert_eq!(to_f64(Decimal::ZERO), 0.0);
    }

    #[test]
    fn test_decimal_precision_over_f64() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum = Decimal::new(1, 1) + Decimal::new(2, 1);
        assert_eq!(format_amount(sum), "0.30");
    }
}
