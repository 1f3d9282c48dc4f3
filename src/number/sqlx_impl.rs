//! Optional `sqlx` support, gated behind the `sqlx` feature the same way
//! the teacher's `ancdec::sqlx_impl` gates its fixed-width type's Postgres
//! `NUMERIC` binding. Ported to work over this crate's variable-length
//! digit vectors instead of the teacher's two fixed `u64` fields: digits
//! come from [`super::digits::int_digits_vec`]/[`super::digits::frac_digits_vec`]
//! and are regrouped into Postgres's base-10000 "NBASE" words.
//!
//! Text-format values go through the same `Display`/`FromStr` round trip as
//! every other string boundary in this crate; only the binary format needs
//! its own digit-group encoder/decoder.

use super::digits::{frac_digits_vec, int_digits_vec};
use super::{Number, Sign};
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    postgres::{PgArgumentBuffer, PgHasArrayType, PgTypeInfo, PgValueFormat, PgValueRef},
    Decode, Encode, Postgres, Type, TypeInfo,
};

const NUMERIC_POS: u16 = 0x0000;
const NUMERIC_NEG: u16 = 0x4000;

impl Type<Postgres> for Number {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("NUMERIC")
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        *ty == Self::type_info() || ty.name() == "NUMERIC" || ty.name() == "DECIMAL"
    }
}

impl PgHasArrayType for Number {
    fn array_type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_NUMERIC")
    }
}

/// Groups `digits` (most significant first) into base-10000 words counted
/// from the right; the leftmost word may hold fewer than 4 digits.
fn group_from_right(digits: &[u8]) -> Vec<i16> {
    if digits.is_empty() {
        return vec![];
    }
    let mut groups = Vec::new();
    let mut end = digits.len();
    while end > 0 {
        let start = end.saturating_sub(4);
        let v = digits[start..end].iter().fold(0i16, |acc, &d| acc * 10 + d as i16);
        groups.push(v);
        end = start;
    }
    groups.reverse();
    groups
}

/// Groups `digits` (tenths-first) into base-10000 words counted from the
/// left; the rightmost word is zero-padded up to 4 digits.
fn group_from_left(digits: &[u8]) -> Vec<i16> {
    if digits.is_empty() {
        return vec![];
    }
    let mut groups = Vec::new();
    let mut start = 0;
    while start < digits.len() {
        let end = (start + 4).min(digits.len());
        let slice = &digits[start..end];
        let mut v = slice.iter().fold(0i16, |acc, &d| acc * 10 + d as i16);
        v *= 10i16.pow((4 - slice.len()) as u32);
        groups.push(v);
        start = end;
    }
    groups
}

impl Encode<'_, Postgres> for Number {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        if self.is_zero() {
            buf.extend_from_slice(&0u16.to_be_bytes());
            buf.extend_from_slice(&0i16.to_be_bytes());
            buf.extend_from_slice(&NUMERIC_POS.to_be_bytes());
            buf.extend_from_slice(&(self.scale as u16).to_be_bytes());
            return Ok(IsNull::No);
        }

        let int_groups = group_from_right(&int_digits_vec(self));
        let frac_groups = group_from_left(&frac_digits_vec(self));

        let weight = if !int_groups.is_empty() {
            int_groups.len() as i16 - 1
        } else {
            let first_nonzero = frac_groups.iter().position(|&g| g != 0).unwrap_or(0);
            -(first_nonzero as i16 + 1)
        };

        let mut words: Vec<i16> = int_groups;
        words.extend(frac_groups);
        while words.last() == Some(&0) {
            words.pop();
        }
        while words.first() == Some(&0) {
            words.remove(0);
        }

        let ndigits = words.len() as u16;
        let sign = if self.sign == Sign::Minus { NUMERIC_NEG } else { NUMERIC_POS };
        let dscale = self.scale as u16;

        buf.extend_from_slice(&ndigits.to_be_bytes());
        buf.extend_from_slice(&weight.to_be_bytes());
        buf.extend_from_slice(&sign.to_be_bytes());
        buf.extend_from_slice(&dscale.to_be_bytes());
        for w in &words {
            buf.extend_from_slice(&w.to_be_bytes());
        }

        Ok(IsNull::No)
    }

    fn size_hint(&self) -> usize {
        8 + (self.int_digits + self.scale) / 2
    }
}

impl Decode<'_, Postgres> for Number {
    fn decode(value: PgValueRef<'_>) -> Result<Self, BoxDynError> {
        match value.format() {
            PgValueFormat::Text => {
                let s = <&str as Decode<Postgres>>::decode(value)?;
                s.parse::<Number>().map_err(|e| Box::new(e) as BoxDynError)
            }
            PgValueFormat::Binary => {
                let bytes = value.as_bytes()?;
                if bytes.len() < 8 {
                    return Err("invalid numeric".into());
                }
                let ndigits = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
                let weight = i16::from_be_bytes([bytes[2], bytes[3]]);
                let sign = u16::from_be_bytes([bytes[4], bytes[5]]);
                let dscale = u16::from_be_bytes([bytes[6], bytes[7]]);

                if ndigits == 0 {
                    return Ok(Number::zero());
                }

                let mut words = Vec::with_capacity(ndigits);
                for i in 0..ndigits {
                    let off = 8 + i * 2;
                    words.push(i16::from_be_bytes([bytes[off], bytes[off + 1]]));
                }

                let mut s = String::new();
                if sign == NUMERIC_NEG {
                    s.push('-');
                }

                let int_words = (weight + 1).max(0) as usize;
                if int_words == 0 {
                    s.push('0');
                } else {
                    for i in 0..int_words {
                        let w = words.get(i).copied().unwrap_or(0);
                        if i == 0 {
                            s.push_str(&w.to_string());
                        } else {
                            s.push_str(&format!("{w:04}"));
                        }
                    }
                }

                if dscale > 0 {
                    s.push('.');
                    let mut frac = String::new();
                    if weight < -1 {
                        for _ in 0..(-(weight + 1)) {
                            frac.push_str("0000");
                        }
                    }
                    for &w in words.iter().skip(int_words) {
                        frac.push_str(&format!("{w:04}"));
                    }
                    let frac: String = frac.chars().take(dscale as usize).collect();
                    s.push_str(&frac);
                }

                s.parse::<Number>().map_err(|e| Box::new(e) as BoxDynError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;

    fn words_and_weight(n: &Number) -> (Vec<i16>, i16) {
        let int_groups = group_from_right(&int_digits_vec(n));
        let frac_groups = group_from_left(&frac_digits_vec(n));
        let weight = if !int_groups.is_empty() {
            int_groups.len() as i16 - 1
        } else {
            let first_nonzero = frac_groups.iter().position(|&g| g != 0).unwrap_or(0);
            -(first_nonzero as i16 + 1)
        };
        let mut words = int_groups;
        words.extend(frac_groups);
        (words, weight)
    }

    #[test]
    fn groups_plain_integer() {
        let n = parse("123456").unwrap();
        let (words, weight) = words_and_weight(&n);
        assert_eq!(words, vec![12, 3456]);
        assert_eq!(weight, 1);
    }

    #[test]
    fn groups_pure_fraction() {
        let n = parse("0.000123").unwrap();
        let (words, weight) = words_and_weight(&n);
        assert_eq!(words, vec![1, 2300]);
        assert_eq!(weight, -1);
    }

    #[test]
    fn type_name_is_numeric() {
        assert_eq!(<Number as Type<Postgres>>::type_info().to_string(), "NUMERIC");
    }
}
