//! Trait impls: `Display`/`FromStr`, ordering, the arithmetic operators, and
//! the iterator/hash/default plumbing that makes `Number` behave like a
//! built-in numeric type.

use super::{cmp, Number, Sign};
use crate::error::ParseError;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Display trait: enables `format!`, `println!`, `to_string()`.
///
/// `{}` renders the full stored precision. `{:.N}` renders exactly `N`
/// fractional digits, truncating (never rounding) when `N < self.scale()`.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(prec) => f.write_str(&super::convert::to_string_with_precision(self, prec)),
            None => f.write_str(&super::convert::to_string(self, false)),
        }
    }
}

/// FromStr trait: enables `"123.45".parse::<Number>()`.
impl FromStr for Number {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::convert::parse(s)
    }
}

impl TryFrom<&str> for Number {
    type Error = ParseError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        super::convert::parse(s)
    }
}

/// Ord trait: full-precision comparison (`-0` and `0` included).
impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp::compare(self, other, usize::MAX, true)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

/// Default trait: `Number::default()` is canonical zero.
impl Default for Number {
    fn default() -> Self {
        Number::zero()
    }
}

/// Normalizes trailing zeros so `1.0` and `1.00` hash identically, matching
/// `Eq`'s scale-insensitive equality.
impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_zero() {
            0u8.hash(state);
            return;
        }
        let mut scale = self.scale;
        while scale > 0 && super::digits::frac_digit(self, scale) == 0 {
            scale -= 1;
        }
        self.sign.hash(state);
        super::digits::int_digits_vec(self).hash(state);
        (1..=scale).map(|p| super::digits::frac_digit(self, p)).collect::<Vec<u8>>().hash(state);
    }
}

impl Hash for Sign {
    fn hash<H: Hasher>(&self, state: &mut H) {
        matches!(self, Sign::Minus).hash(state);
    }
}

// ============ Value Ops ============

impl Add for Number {
    type Output = Number;
    fn add(self, rhs: Self) -> Number {
        super::arithmetic::add(&self, &rhs, None)
    }
}

impl Sub for Number {
    type Output = Number;
    fn sub(self, rhs: Self) -> Number {
        super::arithmetic::sub(&self, &rhs, None)
    }
}

impl Mul for Number {
    type Output = Number;
    fn mul(self, rhs: Self) -> Number {
        super::mul::multiply(&self, &rhs, self.scale.max(rhs.scale))
    }
}

impl Neg for Number {
    type Output = Number;
    fn neg(self) -> Number {
        let mut n = self;
        if !n.is_zero() {
            n.sign = n.sign.flip();
        }
        n
    }
}

// ============ Reference Ops ============
// All combinations: &T op &T, T op &T, &T op T

impl Add<&Number> for &Number {
    type Output = Number;
    fn add(self, rhs: &Number) -> Number {
        super::arithmetic::add(self, rhs, None)
    }
}
impl Add<&Number> for Number {
    type Output = Number;
    fn add(self, rhs: &Number) -> Number {
        super::arithmetic::add(&self, rhs, None)
    }
}
impl Add<Number> for &Number {
    type Output = Number;
    fn add(self, rhs: Number) -> Number {
        super::arithmetic::add(self, &rhs, None)
    }
}

impl Sub<&Number> for &Number {
    type Output = Number;
    fn sub(self, rhs: &Number) -> Number {
        super::arithmetic::sub(self, rhs, None)
    }
}
impl Sub<&Number> for Number {
    type Output = Number;
    fn sub(self, rhs: &Number) -> Number {
        super::arithmetic::sub(&self, rhs, None)
    }
}
impl Sub<Number> for &Number {
    type Output = Number;
    fn sub(self, rhs: Number) -> Number {
        super::arithmetic::sub(self, &rhs, None)
    }
}

impl Mul<&Number> for &Number {
    type Output = Number;
    fn mul(self, rhs: &Number) -> Number {
        super::mul::multiply(self, rhs, self.scale.max(rhs.scale))
    }
}
impl Mul<&Number> for Number {
    type Output = Number;
    fn mul(self, rhs: &Number) -> Number {
        super::mul::multiply(&self, rhs, self.scale.max(rhs.scale))
    }
}
impl Mul<Number> for &Number {
    type Output = Number;
    fn mul(self, rhs: Number) -> Number {
        super::mul::multiply(self, &rhs, self.scale.max(rhs.scale))
    }
}

impl Neg for &Number {
    type Output = Number;
    fn neg(self) -> Number {
        let mut n = self.clone();
        if !n.is_zero() {
            n.sign = n.sign.flip();
        }
        n
    }
}

// ============ Assign Ops ============

impl AddAssign for Number {
    fn add_assign(&mut self, rhs: Number) {
        *self = super::arithmetic::add(self, &rhs, None);
    }
}

impl AddAssign<&Number> for Number {
    fn add_assign(&mut self, rhs: &Number) {
        *self = super::arithmetic::add(self, rhs, None);
    }
}

impl SubAssign for Number {
    fn sub_assign(&mut self, rhs: Number) {
        *self = super::arithmetic::sub(self, &rhs, None);
    }
}

impl SubAssign<&Number> for Number {
    fn sub_assign(&mut self, rhs: &Number) {
        *self = super::arithmetic::sub(self, rhs, None);
    }
}

impl MulAssign for Number {
    fn mul_assign(&mut self, rhs: Number) {
        *self = super::mul::multiply(self, &rhs, self.scale.max(rhs.scale));
    }
}

impl MulAssign<&Number> for Number {
    fn mul_assign(&mut self, rhs: &Number) {
        *self = super::mul::multiply(self, rhs, self.scale.max(rhs.scale));
    }
}

// ============ Iterator Traits ============
//
// `Sum`/`Product` pick the natural result scale of each fold step (no
// caller-supplied cap), matching `+`/`*`. Callers who need a fixed output
// scale should use `sum_to_scale`/`product_to_scale` instead.

impl Sum for Number {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Number::zero(), |a, x| super::arithmetic::add(&a, &x, None))
    }
}

impl<'a> Sum<&'a Number> for Number {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Number::zero(), |a, x| super::arithmetic::add(&a, x, None))
    }
}

impl Product for Number {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Number::one(), |a, x| super::mul::multiply(&a, &x, a.scale.max(x.scale)))
    }
}

impl<'a> Product<&'a Number> for Number {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Number::one(), |a, x| super::mul::multiply(&a, x, a.scale.max(x.scale)))
    }
}

/// Sums `values` at full natural precision, capping only the final total to
/// `scale` fractional digits. Capping each running total instead (rather
/// than just the end result) would truncate away digits that a later
/// addend could still carry into (`1.005 + 1.005` needs the full `0.010`
/// to land on `2.01` at two decimal places, not `2.00`).
pub fn sum_to_scale<'a, I: IntoIterator<Item = &'a Number>>(values: I, scale: usize) -> Number {
    let total = values.into_iter().fold(Number::zero(), |a, x| super::arithmetic::add(&a, x, None));
    super::rounding::set_scale(&total, scale)
}

/// Multiplies `values` at full natural precision, capping only the final
/// product to `scale` fractional digits.
pub fn product_to_scale<'a, I: IntoIterator<Item = &'a Number>>(values: I, scale: usize) -> Number {
    let total = values.into_iter().fold(Number::one(), |a, x| super::mul::multiply(&a, x, a.scale.max(x.scale)));
    super::rounding::set_scale(&total, scale)
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::from_i64(v)
    }
}

impl From<u64> for Number {
    fn from(v: u64) -> Self {
        Number::from_u64(v)
    }
}
