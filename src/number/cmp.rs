//! Comparison (§4.1): sign-aware ordering bounded by a caller scale.

use super::digits::{any_nonzero_in_range, frac_digit, int_digit};
use super::{Number, Sign};
use std::cmp::Ordering;

/// Compares `a` and `b` as if both were truncated to `scale` fractional
/// digits.
///
/// With `use_sign == true`, a value that is zero at `scale` compares equal
/// regardless of its stored sign (so `"0.00"` and `"-0.00"` compare equal),
/// differing signs decide the order outright, and same-sign operands fall
/// back to a magnitude comparison (reversed when both are negative).
/// With `use_sign == false`, only magnitudes are compared.
pub fn compare(a: &Number, b: &Number, scale: usize, use_sign: bool) -> Ordering {
    if use_sign {
        if a.is_zero_at(scale) && b.is_zero_at(scale) {
            return Ordering::Equal;
        }
        if a.sign != b.sign {
            return if a.sign == Sign::Plus {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
    }
    let mag = compare_magnitude(a, b, scale);
    if use_sign && a.sign == Sign::Minus {
        mag.reverse()
    } else {
        mag
    }
}

/// Compares `|a|` and `|b|` truncated to `scale` fractional digits, ignoring
/// sign entirely.
pub(super) fn compare_magnitude(a: &Number, b: &Number, scale: usize) -> Ordering {
    if a.int_digits != b.int_digits {
        return a.int_digits.cmp(&b.int_digits);
    }
    for pos in 1..=a.int_digits {
        let (da, db) = (int_digit(a, pos), int_digit(b, pos));
        if da != db {
            return da.cmp(&db);
        }
    }

    let eff = scale.min(a.scale).min(b.scale);
    for pos in 1..=eff {
        let (da, db) = (frac_digit(a, pos), frac_digit(b, pos));
        if da != db {
            return da.cmp(&db);
        }
    }

    // Tied up to `eff`; whichever operand has more digits within its own
    // scale (but still bounded by the caller's `scale`) wins if any of
    // those extra digits is non-zero.
    let a_extra_end = scale.min(a.scale) as isize;
    let b_extra_end = scale.min(b.scale) as isize;
    let eff = eff as isize;
    if a_extra_end > eff && any_nonzero_in_range(a, eff + 1, a_extra_end) {
        return Ordering::Greater;
    }
    if b_extra_end > eff && any_nonzero_in_range(b, eff + 1, b_extra_end) {
        return Ordering::Less;
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::parse;

    #[test]
    fn zero_variants_are_equal() {
        let a = parse("0.00").unwrap();
        let b = parse("-0.00").unwrap();
        assert_eq!(compare(&a, &b, 2, true), Ordering::Equal);
    }

    #[test]
    fn scale_bounded_tiebreak() {
        let a = parse("1.1").unwrap();
        let b = parse("1.10001").unwrap();
        assert_eq!(compare(&a, &b, 2, true), Ordering::Equal);
        assert_eq!(compare(&a, &b, 5, true), Ordering::Less);
    }

    #[test]
    fn sign_decides_when_not_both_zero() {
        let a = parse("-1").unwrap();
        let b = parse("1").unwrap();
        assert_eq!(compare(&a, &b, 0, true), Ordering::Less);
    }
}
