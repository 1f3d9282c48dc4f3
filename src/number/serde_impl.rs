//! Optional `serde` support, gated behind the `serde` feature the same way
//! the teacher's `ancdec::serde_impl` gates its fixed-width type: serialize
//! as the decimal string, deserialize through the same parser `FromStr`
//! uses.

use super::{convert, Number};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&convert::to_string(self, false))
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct V;
        impl<'de> de::Visitor<'de> for V {
            type Value = Number;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a decimal string")
            }
            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                convert::parse(s).map_err(E::custom)
            }
        }
        deserializer.deserialize_str(V)
    }
}
