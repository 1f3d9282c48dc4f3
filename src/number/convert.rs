//! String <-> chunk conversion (§4.7).

use super::digits::{frac_digits_vec, int_digits_vec, pack_frac_digits, pack_int_digits};
use super::{Number, Sign};
use crate::chunk::write_chunk_digits;
use crate::error::ParseError;

/// Parses a decimal string of the form `-?[0-9]*(\.[0-9]*)?`, requiring at
/// least one digit somewhere in the string.
pub fn parse(s: &str) -> Result<Number, ParseError> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut i = 0;
    let neg = bytes[0] == b'-';
    if neg {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_str = &s[int_start..i];

    let mut frac_str = "";
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_str = &s[frac_start..i];
    }

    if i != bytes.len() {
        if bytes[i] == b'.' {
            return Err(ParseError::MultipleDecimalPoints);
        }
        return Err(ParseError::TrailingChars);
    }

    if int_str.is_empty() && frac_str.is_empty() {
        return Err(ParseError::NoDigits);
    }

    let sign = if neg { Sign::Minus } else { Sign::Plus };
    let int_digits: Vec<u8> = int_str.bytes().map(|b| b - b'0').collect();
    let frac_digits: Vec<u8> = frac_str.bytes().map(|b| b - b'0').collect();

    let (int_vec, int_chunks, int_digit_count) = pack_int_digits(&int_digits);
    let (frac_vec, frac_chunks, scale) = pack_frac_digits(&frac_digits);
    let mut chunks = frac_vec;
    chunks.extend(int_vec);

    Ok(Number {
        sign,
        chunks,
        int_chunks,
        frac_chunks,
        int_digits: int_digit_count,
        scale,
    }
    .normalize())
}

/// Renders `n` as a decimal string. When `trim` is `true`, trailing zero
/// fractional digits (and a bare trailing `.`) are dropped.
pub fn to_string(n: &Number, trim: bool) -> String {
    let mut s = String::new();
    if n.sign == Sign::Minus && !n.is_zero() {
        s.push('-');
    }

    if n.int_digits == 0 {
        s.push('0');
    } else {
        let mut buf = Vec::with_capacity(n.int_chunks * crate::chunk::K);
        let top = n.chunks[n.frac_chunks + n.int_chunks - 1];
        buf.extend(top.to_string().into_bytes());
        for i in (0..n.int_chunks - 1).rev() {
            write_chunk_digits(n.chunks[n.frac_chunks + i], &mut buf);
        }
        s.push_str(std::str::from_utf8(&buf).unwrap());
    }

    if n.scale > 0 {
        let mut frac_buf = Vec::with_capacity(n.frac_chunks * crate::chunk::K);
        for i in (0..n.frac_chunks).rev() {
            write_chunk_digits(n.chunks[i], &mut frac_buf);
        }
        frac_buf.truncate(n.scale);
        if trim {
            while frac_buf.last() == Some(&b'0') {
                frac_buf.pop();
            }
        }
        if !frac_buf.is_empty() {
            s.push('.');
            s.push_str(std::str::from_utf8(&frac_buf).unwrap());
        }
    }

    s
}

/// Renders `n` to exactly `precision` fractional digits, truncating (never
/// rounding) when `precision < n.scale()`. Backs [`core::fmt::Display`]'s
/// `{:.N}` formatting.
pub fn to_string_with_precision(n: &Number, precision: usize) -> String {
    let int_digits = int_digits_vec(n);
    let mut frac = frac_digits_vec(n);
    frac.truncate(precision);
    frac.resize(precision, 0);

    let mut s = String::new();
    if n.sign == Sign::Minus && !n.is_zero() {
        s.push('-');
    }
    if int_digits.is_empty() {
        s.push('0');
    } else {
        for d in &int_digits {
            s.push((b'0' + d) as char);
        }
    }
    if precision > 0 {
        s.push('.');
        for d in &frac {
            s.push((b'0' + d) as char);
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integer() {
        let n = parse("12345").unwrap();
        assert_eq!(to_string(&n, false), "12345");
    }

    #[test]
    fn parses_pure_fraction() {
        let n = parse(".5").unwrap();
        assert_eq!(n.int_digits(), 0);
        assert_eq!(to_string(&n, false), "0.5");
    }

    #[test]
    fn parses_negative_with_many_chunks() {
        let n = parse("-123456789012345678901234.000300").unwrap();
        assert_eq!(to_string(&n, false), "-123456789012345678901234.000300");
    }

    #[test]
    fn trim_drops_trailing_zeros() {
        let n = parse("1.2000").unwrap();
        assert_eq!(to_string(&n, true), "1.2");
        let z = parse("0.000").unwrap();
        assert_eq!(to_string(&z, true), "0");
    }

    #[test]
    fn rejects_empty_and_malformed() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("-"), Err(ParseError::NoDigits));
        assert_eq!(parse("1.2.3"), Err(ParseError::MultipleDecimalPoints));
        assert_eq!(parse("12a"), Err(ParseError::TrailingChars));
        assert_eq!(parse("."), Err(ParseError::NoDigits));
    }

    #[test]
    fn precision_formatting_pads_and_truncates() {
        let n = parse("1.5").unwrap();
        assert_eq!(to_string_with_precision(&n, 4), "1.5000");
        let m = parse("1.56789").unwrap();
        assert_eq!(to_string_with_precision(&m, 2), "1.56");
    }
}
