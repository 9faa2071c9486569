//! Leading digit extraction

use crate::error::BenfordError;

/// Extractor for the leading significant digit of a number
pub struct DigitExtractor;

impl DigitExtractor {
    /// Return the leading significant digit of `value`, ignoring sign and
    /// decimal point placement.
    ///
    /// Zero yields the sentinel `0`. NaN and infinities are rejected.
    pub fn first_digit(value: f64) -> Result<u8, BenfordError> {
        if !value.is_finite() {
            return Err(BenfordError::InvalidInput(format!(
                "cannot extract a leading digit from non-finite value {value}"
            )));
        }

        if value == 0.0 {
            return Ok(0);
        }

        // Shortest round-trip scientific form, e.g. 0.0003 -> "3e-4"
        let repr = format!("{:e}", value.abs());
        repr.bytes()
            .next()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .ok_or_else(|| {
                BenfordError::InvalidInput(format!("unexpected numeric form {repr}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sentinel() {
        assert_eq!(DigitExtractor::first_digit(0.0).unwrap(), 0);
        assert_eq!(DigitExtractor::first_digit(-0.0).unwrap(), 0);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(DigitExtractor::first_digit(123.0).unwrap(), 1);
        assert_eq!(DigitExtractor::first_digit(0.0456).unwrap(), 4);
        assert_eq!(DigitExtractor::first_digit(-77.0).unwrap(), 7);
        assert_eq!(DigitExtractor::first_digit(9.99).unwrap(), 9);
        assert_eq!(DigitExtractor::first_digit(1.0).unwrap(), 1);
        assert_eq!(DigitExtractor::first_digit(10.0).unwrap(), 1);
        assert_eq!(DigitExtractor::first_digit(5_000_000.0).unwrap(), 5);
    }

    #[test]
    fn test_small_decimal_magnitudes() {
        assert_eq!(DigitExtractor::first_digit(3e-4).unwrap(), 3);
        assert_eq!(DigitExtractor::first_digit(6e-4).unwrap(), 6);
        assert_eq!(DigitExtractor::first_digit(1e-12).unwrap(), 1);
        assert_eq!(DigitExtractor::first_digit(0.0003).unwrap(), 3);
        assert_eq!(DigitExtractor::first_digit(-0.007).unwrap(), 7);
        assert_eq!(DigitExtractor::first_digit(5e-324).unwrap(), 5);

        for digit in 1..=9u8 {
            for exponent in -15..=15 {
                let value: f64 = format!("{digit}e{exponent}").parse().unwrap();
                assert_eq!(
                    DigitExtractor::first_digit(value).unwrap(),
                    digit,
                    "{digit}e{exponent}"
                );
            }
        }
    }

    #[test]
    fn test_scale_invariance() {
        for &x in &[123.0, 0.0456, -77.0, 2.5, 6.25, 845.0] {
            let digit = DigitExtractor::first_digit(x).unwrap();
            for k in -6..=6 {
                let scaled = x * 10f64.powi(k);
                assert_eq!(
                    DigitExtractor::first_digit(scaled).unwrap(),
                    digit,
                    "value {x} scaled by 10^{k}"
                );
            }
        }
    }

    #[test]
    fn test_extreme_magnitudes() {
        assert_eq!(DigitExtractor::first_digit(3.2e300).unwrap(), 3);
        assert_eq!(DigitExtractor::first_digit(4.5e-300).unwrap(), 4);
        assert_eq!(DigitExtractor::first_digit(f64::MAX).unwrap(), 1);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            DigitExtractor::first_digit(f64::NAN),
            Err(BenfordError::InvalidInput(_))
        ));
        assert!(DigitExtractor::first_digit(f64::INFINITY).is_err());
        assert!(DigitExtractor::first_digit(f64::NEG_INFINITY).is_err());
    }
}
