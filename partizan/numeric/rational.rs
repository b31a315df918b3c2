//! Infinite rational number.

use auto_ops::impl_op_ex;
use num_rational::Rational64;
use std::fmt::Display;

/// Infinite rational number.
///
/// This is the interchange type at the construction boundary: games hold
/// dyadic values only, and conversion from here rejects everything else.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rational {
    /// Negative infinity, smaller than all other values
    NegativeInfinity,

    /// A finite number
    Value(Rational64),

    /// Positive infinity, greater than all other values
    PositiveInfinity,
}

impl Rational {
    /// Create a new rational. Panics if denominator is zero.
    #[inline]
    pub fn new(numerator: i64, denominator: u32) -> Self {
        Self::Value(Rational64::new(numerator, denominator as i64))
    }

    /// Check if value is infinite
    #[inline]
    pub const fn is_infinite(&self) -> bool {
        !matches!(self, Self::Value(_))
    }

    /// Get fraction if rational is finite
    ///
    /// # Errors
    /// - Rational is infinite
    pub const fn to_fraction(self) -> Option<(i64, i64)> {
        if let Self::Value(r) = self {
            Some((*r.numer(), *r.denom()))
        } else {
            None
        }
    }
}

impl From<Rational64> for Rational {
    fn from(value: Rational64) -> Self {
        Self::Value(value)
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from(Rational64::from(value))
    }
}

impl From<i32> for Rational {
    fn from(value: i32) -> Self {
        Self::from(value as i64)
    }
}

impl_op_ex!(-|lhs: &Rational| -> Rational {
    match lhs {
        Rational::NegativeInfinity => Rational::PositiveInfinity,
        Rational::Value(val) => Rational::Value(-val),
        Rational::PositiveInfinity => Rational::NegativeInfinity,
    }
});

impl Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeInfinity => write!(f, "-∞"),
            Self::Value(val) => write!(f, "{}", val),
            Self::PositiveInfinity => write!(f, "∞"),
        }
    }
}
