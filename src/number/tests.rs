//! Whole-`Number` property tests (§8): these exercise the public surface
//! across kernels rather than a single module's internals, so they live
//! here instead of in `arithmetic`/`mul`/`cmp`'s own `#[cfg(test)]` blocks.

use super::*;
use crate::round_mode::RoundMode;

fn p(s: &str) -> Number {
    parse(s).unwrap()
}

#[test]
fn zero_is_always_plus_signed() {
    assert_eq!(p("-0").sign(), Sign::Plus);
    assert_eq!(p("-0.000").sign(), Sign::Plus);
    assert_eq!(divide(&p("0"), &p("5"), 4).unwrap().sign(), Sign::Plus);
}

#[test]
fn additive_identity() {
    let a = p("123.456");
    let r = add(&a, &Number::zero(), Some(3));
    assert_eq!(format!("{r}"), "123.456");
}

#[test]
fn addition_is_commutative() {
    let a = p("19.875");
    let b = p("-4.2");
    assert_eq!(add(&a, &b, Some(3)), add(&b, &a, Some(3)));
}

#[test]
fn multiplication_is_commutative() {
    let a = p("19.875");
    let b = p("-4.2");
    assert_eq!(multiply(&a, &b, 3), multiply(&b, &a, 3));
}

#[test]
fn addition_is_associative_at_sufficient_scale() {
    let a = p("1.23");
    let b = p("4.5");
    let c = p("0.006");
    let s = a.scale() + b.scale() + c.scale();
    let left = add(&add(&a, &b, Some(s)), &c, Some(s));
    let right = add(&a, &add(&b, &c, Some(s)), Some(s));
    assert_eq!(left, right);
}

#[test]
fn sub_is_add_inverse() {
    let a = p("7.125");
    let b = p("1.5");
    let s = a.scale().max(b.scale());
    let r = sub(&add(&a, &b, Some(s)), &b, Some(s));
    assert_eq!(r, add(&a, &Number::zero(), Some(s)));
}

#[test]
fn division_identity_stays_within_one_unit() {
    let a = p("10");
    let d = p("3");
    let s = 6;
    let q = divide(&a, &d, s).unwrap();
    let back = multiply(&q, &d, s);
    let diff = sub(&a, &back, Some(s));
    // |a - q*d| must be strictly less than one unit at scale s.
    assert!(!diff.is_zero_at(s - 1) || diff.is_zero());
}

#[test]
fn round_trip_through_string() {
    for s in ["0", "1", "-1", "123.456", "-0.001", "100000000.00000001"] {
        let n = p(s);
        let round_tripped = parse(&to_string(&n, false)).unwrap();
        assert_eq!(n, round_tripped);
        assert_eq!(n.scale(), round_tripped.scale());
    }
}

#[test]
fn compare_is_trichotomous_and_antisymmetric() {
    use std::cmp::Ordering;
    let a = p("1.5");
    let b = p("2.25");
    let fwd = compare(&a, &b, 4, true);
    let back = compare(&b, &a, 4, true);
    assert_eq!(fwd, Ordering::Less);
    assert_eq!(back, Ordering::Greater);
    assert_eq!(compare(&a, &a, 4, true), Ordering::Equal);
}

#[test]
fn rounding_is_idempotent() {
    let n = p("1.2345");
    let once = round(&n, 2, RoundMode::HalfEven);
    let twice = round(&once, 2, RoundMode::HalfEven);
    assert_eq!(once, twice);
}

#[test]
fn half_even_breaks_ties_to_an_even_digit() {
    assert_eq!(format!("{}", round(&p("2.5"), 0, RoundMode::HalfEven)), "2");
    assert_eq!(format!("{}", round(&p("3.5"), 0, RoundMode::HalfEven)), "4");
}

// Concrete end-to-end scenarios from §8 (S1-S8).

#[test]
fn s1_add_tenths() {
    assert_eq!(format!("{}", add(&p("0.1"), &p("0.2"), Some(2))), "0.30");
}

#[test]
fn s2_multiply_large_by_ten() {
    let r = multiply(&p("12345678901234567890"), &p("10"), 0);
    assert_eq!(format!("{r}"), "123456789012345678900");
}

#[test]
fn s3_divide_one_by_three() {
    let r = divide(&p("1"), &p("3"), 10).unwrap();
    assert_eq!(format!("{r}"), "0.3333333333");
}

#[test]
fn s4_divide_exercises_guess_correction() {
    let r = divide(&p("240"), &p("121"), 0).unwrap();
    assert_eq!(format!("{r}"), "1");
}

#[test]
fn s5_compare_zero_and_negative_zero() {
    use std::cmp::Ordering;
    assert_eq!(compare(&p("0.00"), &p("-0.00"), 2, true), Ordering::Equal);
}

#[test]
fn s6_half_even_rounding() {
    assert_eq!(format!("{}", round(&p("2.5"), 0, RoundMode::HalfEven)), "2");
    assert_eq!(format!("{}", round(&p("3.5"), 0, RoundMode::HalfEven)), "4");
}

#[test]
fn s7_toward_zero_negative_half_is_plus_zero() {
    let r = round(&p("-0.5"), 0, RoundMode::TowardZero);
    assert_eq!(format!("{r}"), "0");
    assert_eq!(r.sign(), Sign::Plus);
}

#[test]
fn s8_sub_far_apart_scales() {
    let r = sub(&p("1.0000000000000000001"), &p("1"), Some(19));
    assert_eq!(format!("{r}"), "0.0000000000000000001");
}
