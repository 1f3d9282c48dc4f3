//! Rounding (§4.6) and the scale-adjustment helpers `add`/`sub`/`mul`/`div`
//! use to cap their natural result to a caller-supplied scale.

use super::digits::{
    any_nonzero_in_range, digit_at, from_signed_digits, int_digits_vec, frac_digits_vec,
};
use super::{Number, Sign};
use crate::chunk::{replace_lower_with_zeros, K};
use crate::round_mode::RoundMode;

/// Truncates or zero-pads `n` to exactly `new_scale` fractional digits,
/// without examining any mode — equivalent to `round(n, new_scale,
/// TowardZero)` but implemented over chunks directly (bcmath's
/// `bc_set_new_scale`), since this is the hot path every arithmetic kernel
/// uses to cap its result to a caller scale.
pub(super) fn set_scale(n: &Number, new_scale: usize) -> Number {
    if new_scale >= n.scale {
        return pad_scale(n, new_scale);
    }
    let target_frac_chunks = if new_scale == 0 { 0 } else { (new_scale + K - 1) / K };
    let drop = n.frac_chunks - target_frac_chunks;
    let mut chunks = n.chunks[drop..].to_vec();
    let r = new_scale % K;
    if r != 0 && target_frac_chunks > 0 {
        chunks[0] = replace_lower_with_zeros(chunks[0], r);
    }
    let mut result = Number {
        sign: n.sign,
        chunks,
        int_chunks: n.int_chunks,
        frac_chunks: target_frac_chunks,
        int_digits: n.int_digits,
        scale: new_scale,
    };
    if result.is_zero() {
        result.sign = Sign::Plus;
    }
    result
}

fn pad_scale(n: &Number, new_scale: usize) -> Number {
    if new_scale == n.scale {
        return n.clone();
    }
    let target_frac_chunks = if new_scale == 0 { 0 } else { (new_scale + K - 1) / K };
    let extra = target_frac_chunks - n.frac_chunks;
    let mut chunks = vec![0u64; extra];
    chunks.extend_from_slice(&n.chunks);
    Number {
        sign: n.sign,
        chunks,
        int_chunks: n.int_chunks,
        frac_chunks: target_frac_chunks,
        int_digits: n.int_digits,
        scale: new_scale,
    }
}

fn pow10_signed(precision: isize, sign: Sign) -> Number {
    if precision > 0 {
        let mut frac = vec![0u8; precision as usize];
        frac[precision as usize - 1] = 1;
        from_signed_digits(sign, &[], &frac)
    } else {
        let exp = (-precision) as usize;
        let mut int_d = vec![0u8; exp + 1];
        int_d[0] = 1;
        from_signed_digits(sign, &int_d, &[])
    }
}

fn truncate_to_precision(n: &Number, precision: isize) -> Number {
    let int_digits = int_digits_vec(n);
    if precision >= 0 {
        let mut frac = frac_digits_vec(n);
        frac.truncate(precision as usize);
        from_signed_digits(n.sign, &int_digits, &frac)
    } else {
        let cut = (-precision) as usize;
        let keep_int = int_digits.len().saturating_sub(cut);
        let mut new_int = int_digits[..keep_int].to_vec();
        new_int.extend(std::iter::repeat(0u8).take(int_digits.len() - keep_int));
        from_signed_digits(n.sign, &new_int, &[])
    }
}

fn add_one_at_precision(truncated: &Number, precision: isize) -> Number {
    let scaled_one = pow10_signed(precision, truncated.sign);
    super::arithmetic::add(truncated, &scaled_one, None)
}

fn decide_round_up(n: &Number, precision: isize, mode: RoundMode, check_val: u8) -> bool {
    use RoundMode::*;
    let scale = n.scale as isize;
    let lower_nonzero = || any_nonzero_in_range(n, precision + 2, scale);
    match mode {
        TowardZero => false,
        AwayFromZero => check_val > 0 || lower_nonzero(),
        Ceiling => n.sign == Sign::Plus && (check_val > 0 || lower_nonzero()),
        Floor => n.sign == Sign::Minus && (check_val > 0 || lower_nonzero()),
        HalfUp => check_val >= 5,
        HalfDown | HalfEven | HalfOdd => {
            if check_val > 5 {
                true
            } else if check_val < 5 {
                false
            } else if lower_nonzero() {
                true
            } else {
                match mode {
                    HalfDown => false,
                    HalfEven => digit_at(n, precision) % 2 == 1,
                    HalfOdd => digit_at(n, precision) % 2 == 0,
                    _ => unreachable!(),
                }
            }
        }
    }
}

fn round_out_of_range(n: &Number, precision: isize, mode: RoundMode) -> Number {
    use RoundMode::*;
    match mode {
        HalfUp | HalfDown | HalfEven | HalfOdd | TowardZero => return Number::zero(),
        Ceiling => {
            if n.sign == Sign::Minus {
                return Number::zero();
            }
        }
        Floor => {
            if n.sign == Sign::Plus {
                return Number::zero();
            }
        }
        AwayFromZero => {}
    }
    if n.is_zero() {
        return Number::zero();
    }
    pow10_signed(precision, n.sign)
}

/// Rounds `n` to `precision` fractional digits (negative `precision` rounds
/// into the integer part: `-1` rounds to the nearest ten).
///
/// Three cases, matching bcmath's `bc_round`:
///
/// 1. `precision` lies strictly above the top integer digit (e.g. rounding
///    `42` to the nearest `10_000`): the outcome is decided purely by mode
///    and sign without inspecting `n`'s digits, producing `0` or
///    `±10^-precision`.
/// 2. `precision >= n.scale()`: never reduces precision, only pads with
///    true zero digits.
/// 3. Otherwise: truncate to `precision`, then add one unit at that
///    position if the mode's check-digit/parity rule says to.
pub fn round(n: &Number, precision: isize, mode: RoundMode) -> Number {
    if precision < 0 && (n.int_digits as isize) < -precision {
        return round_out_of_range(n, precision, mode);
    }
    if precision >= 0 && precision as usize >= n.scale {
        return pad_scale(n, precision as usize);
    }
    let check_val = digit_at(n, precision + 1);
    let truncated = truncate_to_precision(n, precision);
    if decide_round_up(n, precision, mode, check_val) {
        add_one_at_precision(&truncated, precision)
    } else {
        truncated
    }
}

/// Rounds down to the nearest integer (`round(n, 0, Floor)`).
pub fn floor(n: &Number) -> Number {
    round(n, 0, RoundMode::Floor)
}

/// Rounds up to the nearest integer (`round(n, 0, Ceiling)`).
pub fn ceil(n: &Number) -> Number {
    round(n, 0, RoundMode::Ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::parse;

    fn r(s: &str, p: isize, m: RoundMode) -> String {
        format!("{}", round(&parse(s).unwrap(), p, m))
    }

    #[test]
    fn half_up_rounds_five_away_from_zero() {
        assert_eq!(r("1.25", 1, RoundMode::HalfUp), "1.3");
        assert_eq!(r("-1.25", 1, RoundMode::HalfUp), "-1.3");
    }

    #[test]
    fn half_even_ties_to_even_neighbor() {
        assert_eq!(r("1.25", 1, RoundMode::HalfEven), "1.2");
        assert_eq!(r("1.35", 1, RoundMode::HalfEven), "1.4");
    }

    #[test]
    fn half_odd_ties_to_odd_neighbor() {
        assert_eq!(r("1.25", 1, RoundMode::HalfOdd), "1.3");
        assert_eq!(r("1.35", 1, RoundMode::HalfOdd), "1.3");
    }

    #[test]
    fn toward_zero_truncates() {
        assert_eq!(r("1.99", 1, RoundMode::TowardZero), "1.9");
        assert_eq!(r("-1.99", 1, RoundMode::TowardZero), "-1.9");
    }

    #[test]
    fn away_from_zero_rounds_up_on_any_remainder() {
        assert_eq!(r("1.01", 1, RoundMode::AwayFromZero), "1.1");
        assert_eq!(r("-1.01", 1, RoundMode::AwayFromZero), "-1.1");
    }

    #[test]
    fn ceiling_and_floor_respect_sign() {
        assert_eq!(r("1.01", 0, RoundMode::Ceiling), "2");
        assert_eq!(r("-1.01", 0, RoundMode::Ceiling), "-1");
        assert_eq!(r("1.01", 0, RoundMode::Floor), "1");
        assert_eq!(r("-1.01", 0, RoundMode::Floor), "-2");
    }

    #[test]
    fn rounding_into_integer_part_carries() {
        assert_eq!(r("999.5", 0, RoundMode::HalfUp), "1000");
        assert_eq!(r("95", -1, RoundMode::HalfUp), "100");
    }

    #[test]
    fn growing_precision_only_pads() {
        assert_eq!(r("1.5", 4, RoundMode::HalfUp), "1.5000");
    }

    #[test]
    fn out_of_range_precision_is_decided_by_mode_alone() {
        assert_eq!(r("42", -5, RoundMode::TowardZero), "0");
        assert_eq!(r("42", -5, RoundMode::Ceiling), "100000");
        assert_eq!(r("-42", -5, RoundMode::Ceiling), "0");
    }

    #[test]
    fn floor_ceil_wrappers() {
        assert_eq!(format!("{}", floor(&parse("1.9").unwrap())), "1");
        assert_eq!(format!("{}", ceil(&parse("1.1").unwrap())), "2");
    }
}
