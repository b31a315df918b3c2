//! Numbers of the form `n/2^m`

use crate::numeric::rational::Rational;
use auto_ops::impl_op_ex;
use std::{
    fmt::Display,
    ops::{Add, Sub},
};

/// Number in form `n/2^m`, always kept in lowest terms
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DyadicRationalNumber {
    numerator: i64,
    denominator_exponent: u32,
}

impl DyadicRationalNumber {
    /// Create a new dyadic
    pub fn new(numerator: i64, denominator_exponent: u32) -> Self {
        Self {
            numerator,
            denominator_exponent,
        }
        .normalized()
    }

    /// Create a new integer
    pub const fn new_integer(number: i64) -> Self {
        Self {
            numerator: number,
            denominator_exponent: 0,
        }
    }

    /// Create a new fraction. Returns [None] if denominator is zero, or the number is not dyadic
    pub fn new_fraction(numerator: i64, denominator: i64) -> Option<Self> {
        if denominator < 0 {
            return Self::new_fraction(numerator.checked_neg()?, denominator.checked_neg()?);
        }

        // Zero has no bits set, so it fails the power-of-two test as well
        if denominator.count_ones() != 1 {
            return None;
        }

        Some(
            Self {
                numerator,
                denominator_exponent: denominator.trailing_zeros(),
            }
            .normalized(),
        )
    }

    /// Convert rational to dyadic. Returns [None] if the rational is infinite or not dyadic
    pub fn from_rational(rational: Rational) -> Option<Self> {
        let (numerator, denominator) = rational.to_fraction()?;
        Self::new_fraction(numerator, denominator)
    }

    /// Get the numerator (`n` from `n/2^m`)
    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Get the denominator (`2^m` from `n/2^m`) if it fits in [u128]
    pub const fn denominator(&self) -> Option<u128> {
        if self.denominator_exponent as usize >= std::mem::size_of::<u128>() * 8 {
            None
        } else {
            // 2^self.denominator_exponent, but as bitshift
            Some(1 << self.denominator_exponent)
        }
    }

    /// Get denominator exponent (`m` from `n/2^m`)
    pub const fn denominator_exponent(&self) -> u32 {
        self.denominator_exponent
    }

    fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    fn normalize(&mut self) {
        // [2*n]/[2*d] = n/d
        while self.numerator % 2 == 0 && self.denominator_exponent != 0 {
            self.numerator >>= 1_i32;
            self.denominator_exponent -= 1;
        }
    }

    /// Add to numerator. It is **NOT** addition function
    #[must_use]
    pub fn step(&self, n: i64) -> Self {
        Self {
            numerator: self.numerator + n,
            denominator_exponent: self.denominator_exponent,
        }
        .normalized()
    }

    /// Convert to integer if it's an integer
    pub fn to_integer(&self) -> Option<i64> {
        // exponent == 0 => denominator == 1 => It's an integer
        (self.denominator_exponent == 0).then_some(self.numerator)
    }

    /// Arithmetic mean of two dyadics
    #[must_use]
    pub fn mean(&self, rhs: &Self) -> Self {
        let mut res = *self + *rhs;
        res.denominator_exponent += 1; // divide by 2
        res.normalized()
    }
}

#[test]
fn step_works() {
    assert_eq!(
        DyadicRationalNumber {
            numerator: 1,
            denominator_exponent: 1,
        }
        .normalized()
        .step(1),
        DyadicRationalNumber {
            numerator: 1,
            denominator_exponent: 0,
        }
        .normalized()
    );
}

impl From<i64> for DyadicRationalNumber {
    fn from(value: i64) -> Self {
        Self::new(value, 0)
    }
}

impl PartialOrd for DyadicRationalNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DyadicRationalNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.denominator_exponent <= other.denominator_exponent {
            i64::cmp(
                &(self.numerator << (other.denominator_exponent - self.denominator_exponent)),
                &other.numerator,
            )
        } else {
            i64::cmp(
                &self.numerator,
                &(other.numerator << (self.denominator_exponent - other.denominator_exponent)),
            )
        }
    }
}

#[test]
fn half_is_less_than_forty_two() {
    let half = DyadicRationalNumber::new(1, 1);
    let forty_two = DyadicRationalNumber::new(42, 0);
    assert!(half <= forty_two);
    assert!(half < forty_two);
    assert!(half != forty_two);
    assert!(forty_two >= half);
    assert!(forty_two > half);
    assert!(forty_two != half);
}

impl_op_ex!(+|lhs: &DyadicRationalNumber, rhs: &DyadicRationalNumber| -> DyadicRationalNumber {
    let (numerator, denominator_exponent) =
    if lhs.denominator_exponent >= rhs.denominator_exponent {
            let denominator_exponent = lhs.denominator_exponent;
            let numerator = lhs.numerator
        + (rhs.numerator << (lhs.denominator_exponent - rhs.denominator_exponent));
        (numerator, denominator_exponent)
    } else {
            let denominator_exponent = rhs.denominator_exponent;
            let numerator = rhs.numerator
        + (lhs.numerator << (rhs.denominator_exponent - lhs.denominator_exponent));
            (numerator, denominator_exponent)
    };
    DyadicRationalNumber {
        numerator,
        denominator_exponent,
    }
    .normalized()
});

impl_op_ex!(+=|lhs: &mut DyadicRationalNumber, rhs: &DyadicRationalNumber| { *lhs = lhs.add(rhs); });

impl_op_ex!(
    -|lhs: &DyadicRationalNumber, rhs: &DyadicRationalNumber| -> DyadicRationalNumber {
        lhs + (-rhs)
    }
);

impl_op_ex!(-=|lhs: &mut DyadicRationalNumber, rhs: &DyadicRationalNumber| { *lhs = lhs.sub(rhs); });

impl_op_ex!(-|lhs: &DyadicRationalNumber| -> DyadicRationalNumber {
    DyadicRationalNumber {
        numerator: -lhs.numerator,
        denominator_exponent: lhs.denominator_exponent,
    }
});

impl_op_ex!(
    *|lhs: &DyadicRationalNumber, rhs: &DyadicRationalNumber| -> DyadicRationalNumber {
        DyadicRationalNumber {
            numerator: lhs.numerator * rhs.numerator,
            denominator_exponent: lhs.denominator_exponent + rhs.denominator_exponent,
        }
        .normalized()
    }
);

impl Display for DyadicRationalNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(int) = self.to_integer() {
            write!(f, "{}", int)?;
        } else if let Some(denum) = self.denominator() {
            write!(f, "{}/{}", self.numerator(), denum)?;
        } else {
            write!(f, "{}/2^{}", self.numerator(), self.denominator_exponent())?;
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for DyadicRationalNumber {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // Small values keep products and shifts comfortably in range
        let numerator = i64::arbitrary(g) % 64;
        let denominator_exponent = u32::arbitrary(g) % 8;
        Self::new(numerator, denominator_exponent)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let denominator_exponent = self.denominator_exponent;
        Box::new(
            self.numerator
                .shrink()
                .map(move |numerator| DyadicRationalNumber::new(numerator, denominator_exponent)),
        )
    }
}
