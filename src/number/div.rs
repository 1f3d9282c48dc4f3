//! Division (§4.5).
//!
//! There is no schoolbook division kernel in bcmath worth porting
//! chunk-for-chunk here (its `bc_divide` leans on the same fast/slow split
//! as multiply, tuned for a C accumulator width that doesn't constrain us).
//! Instead this computes the truncated quotient as a big integer —
//! `floor(|n| / |d| * 10^scale)` — via long division over the raw chunk
//! arrays, one base-`B` quotient digit per step, then reuses the
//! digit-array reconstruction already shared by rounding and the string
//! parser to pack that integer back into a `Number` at the requested scale.
//!
//! The per-step quotient digit for a multi-chunk divisor is found with
//! Knuth's Algorithm D (TAOCP vol. 2 §4.3.1), base-`B` chunks standing in
//! for Knuth's base-`b` words. §4.5's "two-chunk guess" names the right
//! idea — estimate each digit from the divisor's two leading chunks rather
//! than one — but a guess taken directly off the *unscaled* divisor has no
//! usable error bound: if the divisor's own leading chunk is small (e.g.
//! its top chunk is `1`), the naive `top_chunk * 10 + next_digit` estimate
//! can be off by up to a full chunk, and restoring a single step can take
//! as many as `B - 1` corrections. Algorithm D's normalization step —
//! scale both operands by `floor(B / (top_chunk + 1))` so the divisor's
//! leading chunk lands in `[B/2, B)` — is what actually delivers the
//! bounded guess the spec's derivation was reaching for: once normalized,
//! each step's three-chunk-over-two-chunk estimate needs at most one
//! adjustment in the estimation loop and at most one add-back correction,
//! a proven bound rather than an asserted one.
//!
//! The exponent arithmetic matters: `quotient_scaled_int = floor(true_n /
//! true_d * 10^scale)` must be computed at shift `e = scale + fcD*K -
//! fcN*K` applied to the *raw* chunk integers before dividing — `floor`
//! does not distribute over a later multiplication by a power of ten
//! (`floor(1.5*10) = 15`, but `floor(1.5)*10 = 10`), so the scale shift and
//! the division cannot be reordered.

use super::digits::from_signed_digits;
use super::{Number, Sign};
use crate::chunk::{write_chunk_digits, B, K, POW10};
use crate::error::DecimalError;

fn big_trim(mut v: Vec<u64>) -> Vec<u64> {
    while v.last() == Some(&0) {
        v.pop();
    }
    v
}

fn big_mul_small(a: &[u64], m: u64) -> Vec<u64> {
    if m == 0 || a.is_empty() {
        return vec![];
    }
    let mut out = vec![0u64; a.len() + 1];
    let mut carry: u128 = 0;
    for (i, &d) in a.iter().enumerate() {
        let v = d as u128 * m as u128 + carry;
        out[i] = (v % B as u128) as u64;
        carry = v / B as u128;
    }
    out[a.len()] = carry as u64;
    big_trim(out)
}

/// Fast path for a single-chunk divisor (§4.5): walk the numerator chunks
/// most-significant first, folding each step's remainder into the next
/// chunk down as `carry * B + chunk` before dividing again. No guess is
/// ever wrong here since the divisor is exactly one chunk wide.
fn divide_single_chunk(numerator: &[u64], d: u64) -> Vec<u64> {
    let mut quotient_msf = Vec::with_capacity(numerator.len());
    let mut carry: u64 = 0;
    for i in (0..numerator.len()).rev() {
        let window = carry as u128 * B as u128 + numerator[i] as u128;
        let q = (window / d as u128) as u64;
        let r = (window % d as u128) as u64;
        quotient_msf.push(q);
        carry = r;
    }
    quotient_msf.reverse();
    big_trim(quotient_msf)
}

/// Knuth's Algorithm D (TAOCP vol. 2 §4.3.1) for a multi-chunk divisor.
/// `denom` must be trimmed with `denom.len() >= 2`. Base-`B` chunks stand
/// in for Knuth's base-`b` words throughout.
fn divide_multi_chunk(numerator: &[u64], denom: &[u64]) -> Vec<u64> {
    let n = denom.len();
    if numerator.len() < n {
        return vec![0];
    }
    let m = numerator.len() - n;

    // D1: normalize so the divisor's leading chunk is at least `B / 2`.
    // This is what actually bounds each step's guess to at most one
    // correction (see the module doc); an unnormalized divisor has no
    // such bound.
    let norm = B / (denom[n - 1] + 1);
    let mut v = big_mul_small(denom, norm);
    v.resize(n, 0);
    let mut u = big_mul_small(numerator, norm);
    u.resize(m + n + 1, 0);

    let mut quotient = vec![0u64; m + 1];
    for j in (0..=m).rev() {
        // D3: estimate qhat from the top three chunks of the working
        // window against the divisor's top two chunks, then refine.
        let top2 = u[j + n] as u128 * B as u128 + u[j + n - 1] as u128;
        let mut qhat = top2 / v[n - 1] as u128;
        let mut rhat = top2 % v[n - 1] as u128;
        while qhat >= B as u128
            || qhat * v[n - 2] as u128 > rhat * B as u128 + u[j + n - 2] as u128
        {
            qhat -= 1;
            rhat += v[n - 1] as u128;
            if rhat >= B as u128 {
                break;
            }
        }
        let mut qhat = qhat as u64;

        // D4: multiply-and-subtract qhat * v from the window u[j..=j+n].
        let mut borrow: i128 = 0;
        let mut carry: u128 = 0;
        for i in 0..n {
            let p = qhat as u128 * v[i] as u128 + carry;
            carry = p / B as u128;
            let mut diff = u[j + i] as i128 - (p % B as u128) as i128 - borrow;
            borrow = if diff < 0 {
                diff += B as i128;
                1
            } else {
                0
            };
            u[j + i] = diff as u64;
        }
        let mut top_diff = u[j + n] as i128 - carry as i128 - borrow;
        let went_negative = top_diff < 0;
        if went_negative {
            top_diff += B as i128;
        }
        u[j + n] = top_diff as u64;

        // D5/D6: the estimate overshot by exactly one; add the divisor
        // back once and decrement the digit.
        if went_negative {
            qhat -= 1;
            let mut carry = 0u64;
            for i in 0..n {
                let s = u[j + i] + v[i] + carry;
                if s >= B {
                    u[j + i] = s - B;
                    carry = 1;
                } else {
                    u[j + i] = s;
                    carry = 0;
                }
            }
            u[j + n] = (u[j + n] + carry) % B;
        }
        quotient[j] = qhat;
    }
    big_trim(quotient)
}

/// `floor(numerator / denom)` as a little-endian base-`B` chunk vector.
/// `denom` must be non-zero and already trimmed.
fn big_div_trunc(numerator: &[u64], denom: &[u64]) -> Vec<u64> {
    let num = big_trim(numerator.to_vec());
    if num.is_empty() {
        return vec![0];
    }
    let d = big_trim(denom.to_vec());
    let q = if d.len() == 1 {
        divide_single_chunk(&num, d[0])
    } else {
        divide_multi_chunk(&num, &d)
    };
    if q.is_empty() {
        vec![0]
    } else {
        q
    }
}

/// Multiplies the raw integer `chunks` by `10^e`.
fn shift_and_scale(chunks: &[u64], e: usize) -> Vec<u64> {
    let q = e / K;
    let r = e % K;
    let scaled = if r == 0 { chunks.to_vec() } else { big_mul_small(chunks, POW10[r]) };
    let mut out = vec![0u64; q];
    out.extend_from_slice(&scaled);
    big_trim(out)
}

/// Decimal digits (most significant first) of a trimmed little-endian
/// base-`B` integer chunk vector. `[]`/all-zero renders as a single `0`.
fn chunks_to_digits(chunks: &[u64]) -> Vec<u8> {
    let trimmed = big_trim(chunks.to_vec());
    if trimmed.is_empty() {
        return vec![0];
    }
    let mut out = Vec::new();
    let top = trimmed[trimmed.len() - 1];
    for b in top.to_string().bytes() {
        out.push(b - b'0');
    }
    for i in (0..trimmed.len() - 1).rev() {
        let mut buf = Vec::with_capacity(K);
        write_chunk_digits(trimmed[i], &mut buf);
        out.extend(buf.into_iter().map(|b| b - b'0'));
    }
    out
}

/// `n / d`, truncated (never rounded) to `scale` fractional digits.
pub fn divide(n: &Number, d: &Number, scale: usize) -> Result<Number, DecimalError> {
    if d.is_zero() {
        return Err(DecimalError::DivisionByZero);
    }
    if n.is_zero() {
        return Ok(super::rounding::set_scale(&Number::zero(), scale));
    }

    let sign = if n.sign == d.sign { Sign::Plus } else { Sign::Minus };

    // `|d| == 1` shortcut (§4.5 preprocessing step 3): the quotient is just
    // `n` with the sign fixed up and rescaled to the caller's `scale`.
    if d.int_digits == 1 && d.frac_chunks == 0 && d.int_chunk(0) == 1 {
        let mut result = super::rounding::set_scale(n, scale);
        result.sign = if result.is_zero() { Sign::Plus } else { sign };
        return Ok(result);
    }

    let fc_n = (n.frac_chunks * K) as isize;
    let fc_d = (d.frac_chunks * K) as isize;
    let e = scale as isize + fc_d - fc_n;

    let num_trimmed = big_trim(n.chunks.clone());
    let denom_trimmed = big_trim(d.chunks.clone());

    let (numerator, denominator) = if e >= 0 {
        (shift_and_scale(&num_trimmed, e as usize), denom_trimmed)
    } else {
        (num_trimmed, shift_and_scale(&denom_trimmed, (-e) as usize))
    };

    let quotient = big_div_trunc(&numerator, &denominator);
    let digits = chunks_to_digits(&quotient);
    let total = digits.len();

    let (int_part, frac_part): (Vec<u8>, Vec<u8>) = if scale == 0 {
        (digits, vec![])
    } else if total <= scale {
        let mut frac = vec![0u8; scale - total];
        frac.extend_from_slice(&digits);
        (vec![], frac)
    } else {
        let split = total - scale;
        (digits[..split].to_vec(), digits[split..].to_vec())
    };

    Ok(from_signed_digits(sign, &int_part, &frac_part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::parse;

    fn d(x: &str, y: &str, scale: usize) -> String {
        format!("{}", divide(&parse(x).unwrap(), &parse(y).unwrap(), scale).unwrap())
    }

    #[test]
    fn exact_division() {
        assert_eq!(d("10", "4", 2), "2.50");
    }

    #[test]
    fn repeating_quotient_truncates() {
        assert_eq!(d("1", "3", 5), "0.33333");
    }

    #[test]
    fn negative_dividend_flips_sign() {
        assert_eq!(d("-7", "2", 3), "-3.500");
    }

    #[test]
    fn both_negative_yields_positive() {
        assert_eq!(d("-9", "-2", 0), "4");
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let n = parse("1").unwrap();
        let z = parse("0").unwrap();
        assert_eq!(divide(&n, &z, 2), Err(DecimalError::DivisionByZero));
    }

    #[test]
    fn zero_numerator_yields_zero_at_scale() {
        assert_eq!(d("0", "5", 3), "0.000");
    }

    #[test]
    fn small_quotient_truncates_to_zero() {
        assert_eq!(d("0.00000005", "5", 0), "0");
    }

    #[test]
    fn crosses_chunk_boundary() {
        assert_eq!(d("100000000", "7", 0), "14285714");
    }

    #[test]
    fn divisor_larger_than_dividend() {
        assert_eq!(d("1", "1000000", 6), "0.000001");
    }

    #[test]
    fn divisor_of_exactly_one_short_circuits() {
        assert_eq!(d("12.5", "1", 3), "12.500");
        assert_eq!(d("12.5", "-1", 3), "-12.500");
    }

    #[test]
    fn s4_single_chunk_divisor() {
        // S4 from the spec's scenario table. Both operands fit in one
        // chunk here, so this exercises `divide_single_chunk`, not the
        // multi-chunk guess-and-correct path (see
        // `multi_chunk_divisor_with_small_top_chunk_needs_no_runaway_guess`
        // below for that).
        assert_eq!(d("240", "121", 0), "1");
    }

    #[test]
    fn multi_chunk_divisor_with_small_top_chunk_needs_no_runaway_guess() {
        // Divisor `199999999` is 9 digits: a 2-chunk number whose top
        // chunk is just `1`. Estimating a quotient digit against an
        // unnormalized divisor this thin has no error bound (dividing by
        // `1` puts no ceiling on the trial digit); `divide_multi_chunk`
        // normalizes first (Algorithm D's D1), which is what keeps this
        // case's guess within the proven one-correction bound.
        assert_eq!(d("199999999989999999", "199999999", 0), "1000000004");
    }

    #[test]
    fn many_chunk_quotient_matches_known_value() {
        // 10 / 3 repeating, well past one chunk of scale.
        assert_eq!(d("1", "3", 20), "0.33333333333333333333");
    }

    #[test]
    fn divisor_wider_than_one_chunk() {
        let big_divisor = "1".to_string() + &"0".repeat(9); // 1_000000000 (10 digits, 2 chunks)
        assert_eq!(d("3000000000", &big_divisor, 0), "3");
    }
}
