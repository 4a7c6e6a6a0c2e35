//! The exact and approximate numbers at the leaves of an expression.

use rug::{Integer, Rational};
use std::{cmp::Ordering, ops::Neg};

/// A numeric value: either an exact rational number or a float.
///
/// Rationals are always stored in lowest terms with a positive denominator (this is maintained by
/// [`rug`]), so an integer is simply a rational with denominator `1`, and zero has exactly one
/// exact representation.
///
/// Arithmetic between two rationals stays exact. Arithmetic involving a float produces a float, or
/// [`None`] if the float would not be finite.
#[derive(Debug, Clone)]
pub enum Number {
    /// An exact rational number, such as `2` or `-3/4`.
    Rational(Rational),

    /// A floating-point number, such as `0.5`.
    Float(f64),
}

/// [`Eq`] is implemented manually to allow comparing [`Number::Float`]s. This module **must
/// never** produce non-finite floats (such as `NaN` or `Infinity`)! Report any bugs that cause
/// this to happen.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rational(lhs), Self::Rational(rhs)) => lhs == rhs,
            (Self::Float(lhs), Self::Float(rhs)) => lhs.to_bits() == rhs.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Number {}

/// [`Hash`] is implemented manually to allow hashing [`Number::Float`]s, consistent with the
/// bitwise [`Eq`] implementation.
impl std::hash::Hash for Number {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Rational(rational) => rational.hash(state),
            Self::Float(float) => float.to_bits().hash(state),
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rational(rational) => write!(f, "{}", rational),
            Self::Float(float) => write!(f, "{:?}", float),
        }
    }
}

impl From<Rational> for Number {
    fn from(rational: Rational) -> Self {
        Self::Rational(rational)
    }
}

impl From<Integer> for Number {
    fn from(integer: Integer) -> Self {
        Self::Rational(Rational::from(integer))
    }
}

impl From<i64> for Number {
    fn from(integer: i64) -> Self {
        Self::Rational(Rational::from(integer))
    }
}

impl Number {
    /// Creates a float, returning [`None`] if it is not finite.
    pub fn float(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self::Float(value))
    }

    /// Returns true if the number is exact or float zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Rational(rational) => rational.cmp0() == Ordering::Equal,
            Self::Float(float) => *float == 0.0,
        }
    }

    /// Returns true if the number is exact or float one.
    pub fn is_one(&self) -> bool {
        match self {
            Self::Rational(rational) => *rational == 1,
            Self::Float(float) => *float == 1.0,
        }
    }

    /// Returns true if the number is exact or float negative one.
    pub fn is_minus_one(&self) -> bool {
        match self {
            Self::Rational(rational) => *rational == -1,
            Self::Float(float) => *float == -1.0,
        }
    }

    /// Returns true if the number is strictly negative.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Rational(rational) => rational.cmp0() == Ordering::Less,
            Self::Float(float) => *float < 0.0,
        }
    }

    /// Returns true if the number is strictly positive.
    pub fn is_positive(&self) -> bool {
        match self {
            Self::Rational(rational) => rational.cmp0() == Ordering::Greater,
            Self::Float(float) => *float > 0.0,
        }
    }

    /// Returns true if the number is a float.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Returns true if the number is an exact integer. Floats are never considered integers.
    pub fn is_integer(&self) -> bool {
        self.as_integer().is_some()
    }

    /// Returns true if the number is an exact even integer.
    pub fn is_even_integer(&self) -> bool {
        self.as_integer().map(Integer::is_even).unwrap_or(false)
    }

    /// If the number is an exact rational, returns a reference to it.
    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            Self::Rational(rational) => Some(rational),
            Self::Float(_) => None,
        }
    }

    /// If the number is an exact integer, returns a reference to it.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Rational(rational) if *rational.denom() == 1 => Some(rational.numer()),
            _ => None,
        }
    }

    /// Returns the value of the number as a float.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Rational(rational) => rational.to_f64(),
            Self::Float(float) => *float,
        }
    }

    /// Returns the absolute value of the number.
    pub fn abs(&self) -> Self {
        match self {
            Self::Rational(rational) => Self::Rational(rational.clone().abs()),
            Self::Float(float) => Self::Float(float.abs()),
        }
    }

    /// Returns the reciprocal of the number, or [`None`] if it is zero.
    pub fn recip(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }

        match self {
            Self::Rational(rational) => Some(Self::Rational(rational.clone().recip())),
            Self::Float(float) => Self::float(float.recip()),
        }
    }

    /// Compares the values of two numbers.
    ///
    /// Two rationals are compared exactly. Otherwise, the numbers are compared as floats.
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Rational(lhs), Self::Rational(rhs)) => lhs.cmp(rhs),
            (lhs, rhs) => lhs.to_f64().total_cmp(&rhs.to_f64()),
        }
    }

    /// Adds two numbers, returning [`None`] if the sum overflows a float.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (Self::Rational(lhs), Self::Rational(rhs)) => Some(Self::Rational(lhs + rhs)),
            (lhs, rhs) => Self::float(lhs.to_f64() + rhs.to_f64()),
        }
    }

    /// Multiplies two numbers, returning [`None`] if the product overflows a float.
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (Self::Rational(lhs), Self::Rational(rhs)) => Some(Self::Rational(lhs * rhs)),
            (lhs, rhs) => Self::float(lhs.to_f64() * rhs.to_f64()),
        }
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Self::Output {
        match self {
            Self::Rational(rational) => Self::Rational(-rational),
            Self::Float(float) => Self::Float(-float),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::rat;
    use pretty_assertions::assert_eq;

    #[test]
    fn exact_arithmetic() {
        let sum = Number::from(rat(1, 2)).checked_add(Number::from(rat(1, 3))).unwrap();
        assert_eq!(sum, Number::from(rat(5, 6)));

        let product = Number::from(rat(2, 3)).checked_mul(Number::from(rat(3, 2))).unwrap();
        assert!(product.is_one());
        assert!(product.is_integer());
    }

    #[test]
    fn float_is_contagious() {
        let sum = Number::from(1i64).checked_add(Number::Float(0.5));
        assert_eq!(sum, Some(Number::Float(1.5)));
    }

    #[test]
    fn zero_has_one_exact_form() {
        let sum = Number::from(rat(1, 2)).checked_add(Number::from(rat(-2, 4))).unwrap();
        assert!(sum.is_zero());
        assert_eq!(sum, Number::from(0i64));
    }

    #[test]
    fn compare_mixed() {
        assert_eq!(Number::from(rat(1, 3)).cmp_value(&Number::Float(0.5)), Ordering::Less);
        assert_eq!(Number::from(2i64).cmp_value(&Number::from(rat(4, 2))), Ordering::Equal);
    }

    #[test]
    fn overflow_is_not_a_number() {
        let big = Number::Float(1e308);
        assert_eq!(big.clone().checked_add(big.clone()), None);
        assert_eq!(big.clone().checked_mul(Number::from(10i64)), None);
        assert_eq!(big.clone().checked_add(Number::Float(-1e308)), Some(Number::Float(0.0)));
    }

    #[test]
    fn no_recip_of_zero() {
        assert_eq!(Number::Float(0.0).recip(), None);
        assert_eq!(Number::from(rat(-2, 3)).recip(), Some(Number::from(rat(-3, 2))));
    }
}
