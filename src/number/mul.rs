//! Multiplication (§4.4).
//!
//! Grounded in bcmath's `recmul.c`: a schoolbook convolution over the raw
//! chunk arrays (`bc_standard_mul`) with carries deferred and flushed every
//! [`MUL_FLUSH_THRESHOLD`] outer iterations (`bc_mul_carry_calc`), plus a
//! single-chunk fast path (`bc_fast_mul`).
//!
//! Multiplying the raw chunk arrays directly is correct even when either
//! operand's lowest chunk is protruded: read positionally as a base-`B`
//! integer, `chunks` always equals `true_value * 10^(frac_chunks * K)`, so
//! the schoolbook product of the two raw arrays equals the true product
//! scaled by `10^((fcA + fcB) * K)`. That natural fractional-chunk count can
//! exceed the canonical `ceil((scaleA + scaleB) / K)`; the excess low chunks
//! are guaranteed to be exactly zero and are dropped below.

use super::{Number, Sign};
use crate::chunk::{B, K, MUL_FLUSH_THRESHOLD};

fn mul_carry_calc(acc: &mut [u64]) {
    let mut carry: u128 = 0;
    for slot in acc.iter_mut() {
        let v = *slot as u128 + carry;
        *slot = (v % B as u128) as u64;
        carry = v / B as u128;
    }
    debug_assert_eq!(carry, 0, "multiply accumulator overflowed its allocated width");
}

/// Schoolbook convolution of two raw little-endian base-`B` digit arrays.
fn raw_mul(a: &[u64], b: &[u64]) -> Vec<u64> {
    if a.len() == 1 {
        return raw_mul_by_small(b, a[0]);
    }
    if b.len() == 1 {
        return raw_mul_by_small(a, b[0]);
    }

    let mut acc = vec![0u64; a.len() + b.len() + 1];
    let mut since_flush = 0usize;
    for i in 0..a.len() {
        if a[i] != 0 {
            for j in 0..b.len() {
                acc[i + j] += a[i] * b[j];
            }
        }
        since_flush += 1;
        if since_flush >= MUL_FLUSH_THRESHOLD {
            mul_carry_calc(&mut acc);
            since_flush = 0;
        }
    }
    mul_carry_calc(&mut acc);
    acc
}

fn raw_mul_by_small(a: &[u64], m: u64) -> Vec<u64> {
    let mut out = vec![0u64; a.len() + 1];
    let mut carry: u128 = 0;
    for (i, &d) in a.iter().enumerate() {
        let v = d as u128 * m as u128 + carry;
        out[i] = (v % B as u128) as u64;
        carry = v / B as u128;
    }
    out[a.len()] = carry as u64;
    out
}

/// `a * b`, with the natural fractional width capped so the result never
/// carries more than `max(result_scale_cap, a.scale(), b.scale())`
/// fractional digits (bcmath's `bc_multiply` scale clamp).
pub fn multiply(a: &Number, b: &Number, result_scale_cap: usize) -> Number {
    let sign = if a.sign == b.sign { Sign::Plus } else { Sign::Minus };
    let natural_scale_zero_case = a.scale + b.scale;
    if a.is_zero() || b.is_zero() {
        let capped = natural_scale_zero_case.min(result_scale_cap.max(a.scale.max(b.scale)));
        return super::rounding::set_scale(&Number::zero(), capped);
    }

    let raw = raw_mul(&a.chunks, &b.chunks);
    let fc_raw = a.frac_chunks + b.frac_chunks;
    let natural_scale = a.scale + b.scale;
    let target_fc = if natural_scale == 0 { 0 } else { (natural_scale + K - 1) / K };
    let drop_low = fc_raw - target_fc;

    let mut chunks = raw[drop_low..].to_vec();
    let mut int_chunks = chunks.len() - target_fc;
    if int_chunks == 0 {
        chunks.push(0);
        int_chunks = 1;
    }

    let product = Number {
        sign,
        chunks,
        int_chunks,
        frac_chunks: target_fc,
        int_digits: 0,
        scale: natural_scale,
    }
    .normalize();

    let capped_scale = natural_scale.min(result_scale_cap.max(a.scale.max(b.scale)));
    if capped_scale == natural_scale {
        product
    } else {
        super::rounding::set_scale(&product, capped_scale)
    }
}

/// `a * a`, sharing `multiply`'s raw convolution (bcmath keeps `bc_square`
/// distinct only to skip re-deriving the second operand's chunk pointers; in
/// this chunk layout there is no such win, so it is a thin wrapper).
pub fn square(a: &Number, result_scale_cap: usize) -> Number {
    multiply(a, a, result_scale_cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::parse;

    fn m(x: &str, y: &str, cap: usize) -> String {
        format!("{}", multiply(&parse(x).unwrap(), &parse(y).unwrap(), cap))
    }

    #[test]
    fn small_terminating_product() {
        assert_eq!(m("0.12", "0.34", 10), "0.0408");
    }

    #[test]
    fn tiny_fractions_underflow_into_low_digits() {
        assert_eq!(m("0.003", "0.003", 10), "0.000009");
    }

    #[test]
    fn crosses_chunk_boundary() {
        assert_eq!(m("100000000", "100000000", 0), "10000000000000000");
    }

    #[test]
    fn sign_rules() {
        assert_eq!(m("-3", "4", 0), "-12");
        assert_eq!(m("-3", "-4", 0), "12");
    }

    #[test]
    fn zero_operand_yields_zero() {
        assert_eq!(m("0", "123.456", 2), "0.000");
    }

    #[test]
    fn scale_cap_truncates_natural_result() {
        assert_eq!(m("1.23", "1.23", 2), "1.51");
    }

    #[test]
    fn cap_never_drops_below_operand_scales() {
        assert_eq!(m("1.5", "2", 0), "3.0");
    }

    #[test]
    fn square_matches_self_multiply() {
        let a = parse("12.5").unwrap();
        assert_eq!(format!("{}", square(&a, 4)), format!("{}", multiply(&a, &a, 4)));
    }
}
