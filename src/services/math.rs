//! Arithmetic behind the `/sum`, `/division`, ... endpoints.

use thiserror::Error;

use crate::constants::messages;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MathError {
    #[error("{}", messages::NON_NUMERIC)]
    NonNumeric(String),

    #[error("Division by zero is not allowed")]
    DivisionByZero,

    #[error("Square root of a negative number is not allowed")]
    NegativeSquareRoot,
}

/// Optional sign, digits, optional fraction. A comma works as decimal separator.
pub fn parse_number(value: &str) -> Result<f64, MathError> {
    let normalized = value.trim().replace(',', ".");
    let unsigned = normalized
        .strip_prefix(['-', '+'])
        .unwrap_or(&normalized);

    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or(("", unsigned));
    let well_formed = !frac_part.is_empty()
        && int_part.chars().all(|c| c.is_ascii_digit())
        && frac_part.chars().all(|c| c.is_ascii_digit());

    if !well_formed {
        return Err(MathError::NonNumeric(value.to_string()));
    }

    normalized
        .parse()
        .map_err(|_| MathError::NonNumeric(value.to_string()))
}

#[must_use]
pub fn sum(a: f64, b: f64) -> f64 {
    a + b
}

#[must_use]
pub fn subtraction(a: f64, b: f64) -> f64 {
    a - b
}

#[must_use]
pub fn multiplication(a: f64, b: f64) -> f64 {
    a * b
}

pub fn division(a: f64, b: f64) -> Result<f64, MathError> {
    if b == 0.0 {
        return Err(MathError::DivisionByZero);
    }
    Ok(a / b)
}

#[must_use]
pub fn mean(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

pub fn square_root(a: f64) -> Result<f64, MathError> {
    if a < 0.0 {
        return Err(MathError::NegativeSquareRoot);
    }
    Ok(a.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers() {
        assert_eq!(parse_number("5").unwrap(), 5.0);
        assert_eq!(parse_number("-2.5").unwrap(), -2.5);
        assert_eq!(parse_number("3,75").unwrap(), 3.75);
        assert_eq!(parse_number(".5").unwrap(), 0.5);
        assert_eq!(parse_number("+7").unwrap(), 7.0);
    }

    #[test]
    fn rejects_non_numbers() {
        for bad in ["", "abc", "NaN", "inf", "1e5", "1.", "1.2.3", "--1", " "] {
            assert_eq!(
                parse_number(bad),
                Err(MathError::NonNumeric(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn arithmetic() {
        assert_eq!(sum(2.0, 3.0), 5.0);
        assert_eq!(subtraction(2.0, 3.0), -1.0);
        assert_eq!(multiplication(2.0, 3.0), 6.0);
        assert_eq!(division(3.0, 2.0).unwrap(), 1.5);
        assert_eq!(mean(2.0, 3.0), 2.5);
        assert_eq!(square_root(81.0).unwrap(), 9.0);
    }

    #[test]
    fn rejects_undefined_results() {
        assert_eq!(division(1.0, 0.0), Err(MathError::DivisionByZero));
        assert_eq!(square_root(-4.0), Err(MathError::NegativeSquareRoot));
        assert_eq!(
            MathError::NonNumeric("x".to_string()).to_string(),
            "Please set a numeric value"
        );
    }
}
