use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Convert a Kelvin reading to Celsius, rounded half-up to two places.
///
/// `None` for NaN, infinities and readings too large for a `Decimal`.
pub fn kelvin_to_celsius(kelvin: f64) -> Option<Decimal> {
    let kelvin = Decimal::from_f64(kelvin)?;
    let offset = Decimal::new(27315, 2);
    Some((kelvin - offset).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Always two decimal places, e.g. `26.85`.
pub fn format_celsius(celsius: Decimal) -> String {
    format!("{:.2}", celsius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(kelvin: f64) -> String {
        format_celsius(kelvin_to_celsius(kelvin).unwrap())
    }

    #[test]
    fn test_300_kelvin() {
        assert_eq!(display(300.0), "26.85");
    }

    #[test]
    fn test_freezing_point() {
        assert_eq!(display(273.15), "0.00");
    }

    #[test]
    fn test_absolute_zero() {
        assert_eq!(display(0.0), "-273.15");
    }

    #[test]
    fn test_fractional_kelvin() {
        assert_eq!(display(310.5), "37.35");
        assert_eq!(display(288.71), "15.56");
    }

    #[test]
    fn test_rounds_to_two_places() {
        assert_eq!(display(300.123), "26.97");
        assert_eq!(display(300.127), "26.98");
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        // banker's rounding would give 27.00 and 0.00
        assert_eq!(display(300.155), "27.01");
        assert_eq!(display(273.155), "0.01");
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(kelvin_to_celsius(1e30).is_none());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(kelvin_to_celsius(f64::NAN).is_none());
        assert!(kelvin_to_celsius(f64::INFINITY).is_none());
    }
}
