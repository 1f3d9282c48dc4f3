//! The arbitrary-precision decimal type and its invariants.

mod arithmetic;
mod cmp;
mod convert;
mod digits;
mod div;
mod mul;
mod ops;
mod rounding;

#[cfg(feature = "serde")]
mod serde_impl;

#[cfg(feature = "sqlx")]
mod sqlx_impl;

#[cfg(test)]
mod tests;

pub use arithmetic::{add, sub};
pub use cmp::compare;
pub use convert::{parse, to_string};
pub use div::divide;
pub use mul::{multiply, square};
pub use rounding::{ceil, floor, round};

use crate::chunk::{digit_count, K};
use std::sync::OnceLock;

/// Sign of a [`Number`]. Canonical zero is always [`Sign::Plus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub(crate) fn flip(self) -> Sign {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }
}

/// An exact, arbitrary-precision base-10 number.
///
/// `chunks` is little-endian by chunk: index `0` is the least-significant
/// fractional chunk (nearest the tail of the number, farthest from the
/// decimal point), index `frac_chunks + int_chunks - 1` is the most
/// significant integer chunk. A chunk that doesn't carry a full [`K`] real
/// digits is *protruded*: its real digits sit in the high digit-slots and
/// the low slots are zero (see [`crate::chunk`]).
///
/// Four invariants hold for every live `Number`:
///
/// 1. The top integer chunk is non-zero, unless the whole value is the
///    canonical zero (`int_chunks == 1`, that chunk `== 0`).
/// 2. Any unused low digit-slots of the lowest fractional chunk are zero.
/// 3. A value that is numerically zero always carries [`Sign::Plus`].
/// 4. `int_digits` is the true decimal digit length of the integer part
///    (`0` for a canonical-zero integer part, never padded with leading
///    zeros).
#[derive(Debug, Clone)]
pub struct Number {
    pub(crate) sign: Sign,
    pub(crate) chunks: Vec<u64>,
    pub(crate) int_chunks: usize,
    pub(crate) frac_chunks: usize,
    pub(crate) int_digits: usize,
    pub(crate) scale: usize,
}

static ZERO_SINGLETON: OnceLock<Number> = OnceLock::new();
static ONE_SINGLETON: OnceLock<Number> = OnceLock::new();

impl Number {
    /// The value `0`.
    pub fn zero() -> Number {
        ZERO_SINGLETON
            .get_or_init(|| Number {
                sign: Sign::Plus,
                chunks: vec![0],
                int_chunks: 1,
                frac_chunks: 0,
                int_digits: 0,
                scale: 0,
            })
            .clone()
    }

    /// The value `1`.
    pub fn one() -> Number {
        ONE_SINGLETON
            .get_or_init(|| Number {
                sign: Sign::Plus,
                chunks: vec![1],
                int_chunks: 1,
                frac_chunks: 0,
                int_digits: 1,
                scale: 0,
            })
            .clone()
    }

    /// Declared number of fractional digits.
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// True decimal digit length of the integer part (`0` for a value with
    /// magnitude less than `1`).
    pub fn int_digits(&self) -> usize {
        self.int_digits
    }

    pub(crate) fn sign(&self) -> Sign {
        self.sign
    }

    /// `true` iff every chunk is zero.
    pub fn is_zero(&self) -> bool {
        self.chunks.iter().all(|&c| c == 0)
    }

    /// `true` iff `self` truncated to `scale` fractional digits is zero.
    pub fn is_zero_at(&self, scale: usize) -> bool {
        if self.int_digits != 0 {
            return false;
        }
        let cutoff = scale.min(self.scale);
        (1..=cutoff).all(|p| digits::frac_digit(self, p) == 0)
    }

    /// `true` iff `self` truncated to `scale` fractional digits is zero or
    /// the smallest representable unit at that scale (bcmath's
    /// `bc_is_near_zero`, which degenerates to this once floating-point
    /// comparison artifacts — inapplicable to an exact decimal type — are
    /// removed).
    pub fn is_near_zero(&self, scale: usize) -> bool {
        if self.int_digits != 0 {
            return false;
        }
        let cutoff = scale.min(self.scale);
        if cutoff == 0 {
            return self.is_zero_at(scale);
        }
        let last = digits::frac_digit(self, cutoff);
        last <= 1 && (1..cutoff).all(|p| digits::frac_digit(self, p) == 0)
    }

    pub(crate) fn int_chunk(&self, i: usize) -> u64 {
        self.chunks[self.frac_chunks + i]
    }

    pub(crate) fn frac_chunk(&self, i: usize) -> u64 {
        self.chunks[i]
    }

    /// Fixes up the leading-zero-trim and `int_digits`/sign invariants after
    /// a kernel has assembled `chunks`/`int_chunks`/`frac_chunks`/`scale`
    /// directly. Every kernel funnels its raw result through this before
    /// returning it.
    pub(crate) fn normalize(mut self) -> Self {
        while self.int_chunks > 1 && self.chunks[self.frac_chunks + self.int_chunks - 1] == 0 {
            self.chunks.pop();
            self.int_chunks -= 1;
        }
        let top = self.chunks[self.frac_chunks + self.int_chunks - 1];
        self.int_digits = if top == 0 {
            0
        } else {
            (self.int_chunks - 1) * K + digit_count(top)
        };
        if self.is_zero() {
            self.sign = Sign::Plus;
        }
        self
    }

    pub(crate) fn from_mag_u64(mag: u64, sign: Sign) -> Number {
        const B: u64 = crate::chunk::B;
        let c0 = mag % B;
        let rem1 = mag / B;
        let c1 = rem1 % B;
        let c2 = rem1 / B;
        let chunks = vec![c0, c1, c2];
        Number {
            sign,
            chunks,
            int_chunks: 3,
            frac_chunks: 0,
            int_digits: 0,
            scale: 0,
        }
        .normalize()
    }

    /// Builds the `Number` for a signed machine integer.
    pub fn from_i64(v: i64) -> Number {
        if v == 0 {
            return Number::zero();
        }
        let sign = if v < 0 { Sign::Minus } else { Sign::Plus };
        let mag = v.unsigned_abs();
        Number::from_mag_u64(mag, sign)
    }

    /// Builds the `Number` for an unsigned machine integer.
    pub fn from_u64(v: u64) -> Number {
        if v == 0 {
            return Number::zero();
        }
        Number::from_mag_u64(v, Sign::Plus)
    }

    /// Converts the integer part to `i64`, saturating the result to `0` on
    /// overflow. Use [`Number::to_i64_checked`] to distinguish a genuine
    /// zero value from an overflowed one.
    pub fn to_i64(&self) -> i64 {
        self.to_i64_checked().unwrap_or(0)
    }

    /// Converts the integer part to `i64`, or `None` if it doesn't fit.
    pub fn to_i64_checked(&self) -> Option<i64> {
        if self.int_chunks > 3 {
            return None;
        }
        let mut mag: u128 = 0;
        for i in (0..self.int_chunks).rev() {
            mag = mag * crate::chunk::B as u128 + self.int_chunk(i) as u128;
        }
        match self.sign {
            Sign::Plus => {
                if mag <= i64::MAX as u128 {
                    Some(mag as i64)
                } else {
                    None
                }
            }
            Sign::Minus => {
                if mag <= i64::MIN.unsigned_abs() as u128 {
                    if mag == i64::MIN.unsigned_abs() as u128 {
                        Some(i64::MIN)
                    } else {
                        Some(-(mag as i64))
                    }
                } else {
                    None
                }
            }
        }
    }
}
