//! Arbitrary-precision decimal arithmetic over packed-decimal chunks.
//!
//! [`Number`] stores a signed decimal value as a little-endian sequence of
//! `u64` chunks, each holding up to [`chunk::K`] decimal digits (`8` on this
//! build), instead of one digit per byte. Multiplying or adding two chunks
//! moves `K` digits at once, which is where the throughput advantage over a
//! byte-per-digit BCD representation comes from; every kernel still
//! produces an exact base-10 result, so there is no binary-floating
//! rounding or base-conversion error anywhere in this crate.
//!
//! The numeric core lives in [`number`]; this crate root re-exports its
//! public surface plus the free-function API named by the operation table
//! below, which mirrors the calling convention of the C library this crate
//! continues:
//!
//! | operation | inputs | output |
//! |---|---|---|
//! | [`parse`] | decimal string | [`Number`] or [`ParseError`] |
//! | [`to_string`] | [`Number`], trim flag | `String` |
//! | [`from_int`] / [`to_int`] | machine integer | [`Number`] / `i64` (`0` on overflow) |
//! | [`add`]/[`sub`]/[`mul`]/[`div`] | two [`Number`]s, optional scale cap | [`Number`] (or [`DecimalError`] for `div`) |
//! | [`compare`] | two [`Number`]s, scale | [`std::cmp::Ordering`] |
//! | [`round`] | [`Number`], signed precision, [`RoundMode`] | [`Number`] |
//! | [`floor`] / [`ceil`] | [`Number`] | [`Number`] |
//!
//! `Number` additionally implements the usual Rust numeric-type traits
//! (`Display`, `FromStr`, `Ord`, the `Add`/`Sub`/`Mul`/`Neg` operators,
//! `Sum`/`Product`, `Hash`, `Default`) so it behaves like a built-in type in
//! ordinary code; the free functions above exist for callers that need an
//! explicit scale cap, which the operator overloads don't take.
//!
//! Nothing in this crate performs I/O or allocates shared mutable state:
//! every operation reads its inputs and returns a freshly allocated
//! [`Number`], so callers may drive many values across threads freely
//! (`Number: Send + Sync`).

pub mod chunk;
pub mod error;
pub mod number;
pub mod round_mode;

pub use error::{DecimalError, ParseError};
pub use number::Number;
pub use round_mode::RoundMode;

/// Parses a decimal string of the form `-?[0-9]*(\.[0-9]*)?`, requiring at
/// least one digit in the integer or fractional part.
pub fn parse(s: &str) -> Result<Number, ParseError> {
    number::parse(s)
}

/// Renders `n` as a decimal string. When `trim` is `true`, trailing zero
/// fractional digits (and a bare trailing `.`) are dropped.
pub fn to_string(n: &Number, trim: bool) -> String {
    number::to_string(n, trim)
}

/// Builds the `Number` for a signed machine integer.
pub fn from_int(i: i64) -> Number {
    Number::from_i64(i)
}

/// Converts `n`'s integer part to `i64`, returning `0` on overflow. Use
/// [`Number::to_i64_checked`] to tell a genuine zero apart from an
/// overflowed one.
pub fn to_int(n: &Number) -> i64 {
    n.to_i64()
}

/// `a + b`, optionally truncated/padded to `scale` fractional digits.
pub fn add(a: &Number, b: &Number, scale: Option<usize>) -> Number {
    number::add(a, b, scale)
}

/// `a - b`, optionally truncated/padded to `scale` fractional digits.
pub fn sub(a: &Number, b: &Number, scale: Option<usize>) -> Number {
    number::sub(a, b, scale)
}

/// `a * b`, with the natural fractional width capped to
/// `max(result_scale_cap, a.scale(), b.scale())`.
pub fn mul(a: &Number, b: &Number, result_scale_cap: usize) -> Number {
    number::multiply(a, b, result_scale_cap)
}

/// `a / b`, truncated (never rounded) to `scale` fractional digits.
pub fn div(a: &Number, b: &Number, scale: usize) -> Result<Number, DecimalError> {
    number::divide(a, b, scale)
}

/// Compares `a` and `b` as if both were truncated to `scale` fractional
/// digits. Signed: differing signs decide the order, except when both
/// operands are zero at `scale` (`"0.00"` and `"-0.00"` compare equal).
pub fn compare(a: &Number, b: &Number, scale: usize) -> std::cmp::Ordering {
    number::compare(a, b, scale, true)
}

/// Rounds `n` to `precision` fractional digits (negative `precision` rounds
/// into the integer part) under the given [`RoundMode`].
pub fn round(n: &Number, precision: isize, mode: RoundMode) -> Number {
    number::round(n, precision, mode)
}

/// Rounds `n` down to the nearest integer.
pub fn floor(n: &Number) -> Number {
    number::floor(n)
}

/// Rounds `n` up to the nearest integer.
pub fn ceil(n: &Number) -> Number {
    number::ceil(n)
}

/// `true` iff `n` is zero, optionally truncated to `scale` fractional
/// digits first.
pub fn is_zero(n: &Number, scale: Option<usize>) -> bool {
    match scale {
        Some(s) => n.is_zero_at(s),
        None => n.is_zero(),
    }
}

/// `true` iff `n` truncated to `scale` fractional digits is zero or the
/// smallest representable unit at that scale.
pub fn is_near_zero(n: &Number, scale: usize) -> bool {
    n.is_near_zero(scale)
}
