//! Addition and subtraction (§4.2/§4.3).
//!
//! Grounded in bcmath's `_bc_do_add`/`_bc_do_sub` (doaddsub.c): the operand
//! with the longer fractional part has its non-overlapping low-order chunks
//! copied verbatim (the shorter operand is implicitly zero there), then the
//! overlapping region — the shorter operand's full chunk range, aligned
//! against the longer operand's corresponding high chunks — is walked with
//! a carry/borrow, which finally propagates through whatever high integer
//! chunks only the longer-int operand has.

use super::cmp::compare_magnitude;
use super::{Number, Sign};
use crate::chunk::B;
use std::cmp::Ordering;

pub(super) fn add_magnitudes(a: &Number, b: &Number) -> Number {
    let min_frac = a.frac_chunks.min(b.frac_chunks);
    let min_int = a.int_chunks.min(b.int_chunks);
    let overlap = min_int + min_frac;
    let result_frac_chunks = a.frac_chunks.max(b.frac_chunks);
    let result_int_chunks = a.int_chunks.max(b.int_chunks) + 1;
    let mut out = vec![0u64; result_frac_chunks + result_int_chunks];
    let mut oi = 0usize;

    let (frac_longer, extra_frac) = if a.frac_chunks != min_frac {
        (a, a.frac_chunks - min_frac)
    } else {
        (b, b.frac_chunks - min_frac)
    };
    for k in 0..extra_frac {
        out[oi] = frac_longer.chunks[k];
        oi += 1;
    }

    let a_start = a.frac_chunks - min_frac;
    let b_start = b.frac_chunks - min_frac;
    let mut carry: u64 = 0;
    for j in 0..overlap {
        let sum = a.chunks[a_start + j] + b.chunks[b_start + j] + carry;
        if sum >= B {
            out[oi] = sum - B;
            carry = 1;
        } else {
            out[oi] = sum;
            carry = 0;
        }
        oi += 1;
    }

    let (int_longer, extra_int) = if a.int_chunks != min_int {
        (a, a.int_chunks - min_int)
    } else {
        (b, b.int_chunks - min_int)
    };
    let int_longer_start = int_longer.frac_chunks + min_int;
    for k in 0..extra_int {
        let v = int_longer.chunks[int_longer_start + k] + carry;
        if v >= B {
            out[oi] = v - B;
            carry = 1;
        } else {
            out[oi] = v;
            carry = 0;
        }
        oi += 1;
    }
    if oi < out.len() {
        out[oi] = carry;
    }

    Number {
        sign: Sign::Plus,
        chunks: out,
        int_chunks: result_int_chunks,
        frac_chunks: result_frac_chunks,
        int_digits: 0,
        scale: a.scale.max(b.scale),
    }
    .normalize()
}

/// Subtracts `smaller` from `larger`; the caller guarantees
/// `|larger| >= |smaller|`.
pub(super) fn sub_magnitudes(larger: &Number, smaller: &Number) -> Number {
    let min_frac = larger.frac_chunks.min(smaller.frac_chunks);
    let overlap = smaller.int_chunks + min_frac;
    let result_frac_chunks = larger.frac_chunks.max(smaller.frac_chunks);
    let result_int_chunks = larger.int_chunks;
    let mut out = vec![0u64; result_frac_chunks + result_int_chunks];
    let mut oi = 0usize;
    let mut borrow: u64 = 0;

    if larger.frac_chunks != min_frac {
        let extra = larger.frac_chunks - min_frac;
        for k in 0..extra {
            out[oi] = larger.chunks[k];
            oi += 1;
        }
    } else {
        let extra = smaller.frac_chunks - min_frac;
        for k in 0..extra {
            let v = smaller.chunks[k] + borrow;
            if v > 0 {
                out[oi] = B - v;
                borrow = 1;
            } else {
                out[oi] = 0;
                borrow = 0;
            }
            oi += 1;
        }
    }

    let larger_start = larger.frac_chunks - min_frac;
    let smaller_start = smaller.frac_chunks - min_frac;
    for j in 0..overlap {
        let sub = smaller.chunks[smaller_start + j] + borrow;
        let lv = larger.chunks[larger_start + j];
        if sub > lv {
            out[oi] = B + lv - sub;
            borrow = 1;
        } else {
            out[oi] = lv - sub;
            borrow = 0;
        }
        oi += 1;
    }

    let remaining_int = larger.int_chunks - smaller.int_chunks;
    let larger_int_start = larger.frac_chunks + smaller.int_chunks;
    for k in 0..remaining_int {
        let lv = larger.chunks[larger_int_start + k];
        if borrow > lv {
            out[oi] = lv + B - borrow;
            borrow = 1;
        } else {
            out[oi] = lv - borrow;
            borrow = 0;
        }
        oi += 1;
    }
    debug_assert_eq!(borrow, 0, "sub_magnitudes called with |larger| < |smaller|");

    Number {
        sign: Sign::Plus,
        chunks: out,
        int_chunks: result_int_chunks,
        frac_chunks: result_frac_chunks,
        int_digits: 0,
        scale: larger.scale.max(smaller.scale),
    }
    .normalize()
}

fn add_natural(a: &Number, b: &Number) -> Number {
    if a.sign == b.sign {
        let mut r = add_magnitudes(a, b);
        r.sign = a.sign;
        if r.is_zero() {
            r.sign = Sign::Plus;
        }
        r
    } else {
        match compare_magnitude(a, b, usize::MAX) {
            Ordering::Equal => Number::zero(),
            Ordering::Greater => {
                let mut r = sub_magnitudes(a, b);
                r.sign = a.sign;
                r
            }
            Ordering::Less => {
                let mut r = sub_magnitudes(b, a);
                r.sign = b.sign;
                r
            }
        }
    }
}

/// `a + b`, optionally truncated/padded to `scale` fractional digits.
pub fn add(a: &Number, b: &Number, scale: Option<usize>) -> Number {
    let natural = add_natural(a, b);
    match scale {
        Some(s) => super::rounding::set_scale(&natural, s),
        None => natural,
    }
}

/// `a - b`, optionally truncated/padded to `scale` fractional digits.
pub fn sub(a: &Number, b: &Number, scale: Option<usize>) -> Number {
    let neg_b = Number {
        sign: b.sign.flip(),
        chunks: b.chunks.clone(),
        int_chunks: b.int_chunks,
        frac_chunks: b.frac_chunks,
        int_digits: b.int_digits,
        scale: b.scale,
    };
    add(a, &neg_b, scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::parse;

    #[test]
    fn add_aligns_differing_scales() {
        let a = parse("1.5").unwrap();
        let b = parse("0.25").unwrap();
        let r = add(&a, &b, None);
        assert_eq!(format!("{r}"), "1.75");
    }

    #[test]
    fn sub_crosses_chunk_boundary() {
        let a = parse("100000000").unwrap();
        let b = parse("1").unwrap();
        let r = sub(&a, &b, None);
        assert_eq!(r.to_i64(), 99_999_999);
    }

    #[test]
    fn opposite_signs_take_larger_magnitude_sign() {
        let a = parse("-5").unwrap();
        let b = parse("3").unwrap();
        let r = add(&a, &b, None);
        assert_eq!(r.to_i64(), -2);
    }

    #[test]
    fn equal_and_opposite_yields_canonical_zero() {
        let a = parse("5").unwrap();
        let b = parse("-5").unwrap();
        let r = add(&a, &b, None);
        assert!(r.is_zero());
        assert_eq!(r.sign(), Sign::Plus);
    }
}
