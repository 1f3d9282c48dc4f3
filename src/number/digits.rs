//! Decimal-digit-level accessors and builders shared by comparison,
//! rounding, and conversion.
//!
//! Every kernel that works with true chunk arithmetic (add/sub/mul/div)
//! operates on `chunks` directly. The handful of operations that reason
//! about individual decimal digits — comparison's scale-bounded tie-break,
//! rounding's check-digit/parity logic, string conversion — go through the
//! accessors here instead of re-deriving chunk offsets each time.

use super::{Number, Sign};
use crate::chunk::{self, K, POW10};

/// Fractional digit at 1-indexed position `pos` counted from the decimal
/// point (`pos == 1` is the tenths digit). Positions beyond `n.scale` read
/// as `0`.
pub(super) fn frac_digit(n: &Number, pos: usize) -> u8 {
    if pos == 0 {
        return 0;
    }
    let window = (pos - 1) / K;
    let offset = (pos - 1) % K;
    if window >= n.frac_chunks {
        return 0;
    }
    let arr_idx = n.frac_chunks - 1 - window;
    let chunk = n.chunks[arr_idx];
    ((chunk / POW10[K - 1 - offset]) % 10) as u8
}

/// Integer digit at 1-indexed position `pos` counted from the most
/// significant digit (`pos == 1` is the leading digit). Positions outside
/// `1..=n.int_digits` read as `0`.
pub(super) fn int_digit(n: &Number, pos: usize) -> u8 {
    if pos == 0 || pos > n.int_digits {
        return 0;
    }
    let from_right = n.int_digits - pos;
    let window = from_right / K;
    let offset = from_right % K;
    let chunk = n.chunks[n.frac_chunks + window];
    ((chunk / POW10[offset]) % 10) as u8
}

/// Unified digit accessor keyed by fractional-position-style `offset`:
/// `offset >= 1` reaches into the fraction (`frac_digit`), `offset <= 0`
/// reaches into the integer part (`offset == 0` is the units digit,
/// `offset == -1` the tens digit, and so on).
pub(super) fn digit_at(n: &Number, offset: isize) -> u8 {
    if offset >= 1 {
        frac_digit(n, offset as usize)
    } else {
        let pos = n.int_digits as isize + offset;
        if pos < 1 || pos as usize > n.int_digits {
            0
        } else {
            int_digit(n, pos as usize)
        }
    }
}

/// `true` iff any digit at an offset in `from..=to` is non-zero. Empty or
/// inverted ranges are vacuously `false`.
pub(super) fn any_nonzero_in_range(n: &Number, from: isize, to: isize) -> bool {
    if from > to {
        return false;
    }
    (from..=to).any(|o| digit_at(n, o) != 0)
}

pub(super) fn int_digits_vec(n: &Number) -> Vec<u8> {
    (1..=n.int_digits).map(|p| int_digit(n, p)).collect()
}

pub(super) fn frac_digits_vec(n: &Number) -> Vec<u8> {
    (1..=n.scale).map(|p| frac_digit(n, p)).collect()
}

/// Packs a run of integer-part digits (most significant first) into chunks,
/// returning `(chunks_low_to_high, int_chunks, int_digits)`.
pub(super) fn pack_int_digits(digits: &[u8]) -> (Vec<u64>, usize, usize) {
    if digits.is_empty() {
        return (vec![0], 1, 0);
    }
    let mut chunks = Vec::new();
    let mut end = digits.len();
    while end > 0 {
        let start = end.saturating_sub(K);
        let group = &digits[start..end];
        let v = match group.try_into() {
            Ok(full) => chunk::parse_chunk_swar8(full),
            Err(_) => chunk::parse_chunk_naive(group),
        };
        chunks.push(v);
        end = start;
    }
    let int_chunks = chunks.len();
    (chunks, int_chunks, digits.len())
}

/// Packs a run of fractional-part digits (nearest the decimal point first)
/// into chunks, applying the protruded-chunk convention to the trailing
/// (possibly short) group. Returns `(chunks_low_to_high, frac_chunks, scale)`.
pub(super) fn pack_frac_digits(digits: &[u8]) -> (Vec<u64>, usize, usize) {
    if digits.is_empty() {
        return (vec![], 0, 0);
    }
    let scale = digits.len();
    let mut groups: Vec<&[u8]> = Vec::new();
    let mut start = 0;
    while start < digits.len() {
        let end = (start + K).min(digits.len());
        groups.push(&digits[start..end]);
        start = end;
    }
    let frac_chunks = groups.len();
    let mut chunks = Vec::with_capacity(frac_chunks);
    for (gi, g) in groups.iter().enumerate().rev() {
        let is_last = gi == frac_chunks - 1;
        let mut v = match (*g).try_into() {
            Ok(full) => chunk::parse_chunk_swar8(full),
            Err(_) => chunk::parse_chunk_naive(g),
        };
        if is_last && g.len() < K {
            v *= POW10[K - g.len()];
        }
        chunks.push(v);
    }
    (chunks, frac_chunks, scale)
}

/// Builds a `Number` from a sign plus separate integer/fractional digit
/// runs, reusing the same packing primitives as the string parser. Used by
/// rounding, which reasons about truncating/incrementing individual digits
/// rather than chunk arithmetic.
pub(super) fn from_signed_digits(sign: Sign, int_digits: &[u8], frac_digits: &[u8]) -> Number {
    let (int_vec, int_chunks, int_digit_count) = pack_int_digits(int_digits);
    let (frac_vec, frac_chunks, scale) = pack_frac_digits(frac_digits);
    let mut chunks = frac_vec;
    chunks.extend(int_vec);
    Number {
        sign,
        chunks,
        int_chunks,
        frac_chunks,
        int_digits: int_digit_count,
        scale,
    }
    .normalize()
}
