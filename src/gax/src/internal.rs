// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Serialization helpers used by the generated data types.
//!
//! These types are intended for the code generator. They are undocumented and
//! may change at any time.
//!
//! Discovery documents describe two encodings that do not match serde's
//! defaults: 64-bit integers travel as decimal strings, and `format: byte`
//! strings carry base64-encoded binary data.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::de::Unexpected::Other;
use std::marker::PhantomData;

/// Serializes `i64` as a string, deserializes it from a string or a number.
pub type I64 = Int64<i64>;

/// Serializes `u64` as a string, deserializes it from a string or a number.
pub type U64 = Int64<u64>;

pub struct Int64<T>(PhantomData<T>);

impl<T> serde_with::SerializeAs<T> for Int64<T>
where
    T: std::fmt::Display,
{
    fn serialize_as<S>(source: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(source)
    }
}

impl<'de, T> serde_with::DeserializeAs<'de, T> for Int64<T>
where
    T: TryFrom<i128>,
{
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        deserializer.deserialize_any(Int64Visitor::<T>(PhantomData))
    }
}

struct Int64Visitor<T>(PhantomData<T>);

impl<T> Int64Visitor<T>
where
    T: TryFrom<i128>,
{
    fn convert<E, V>(value: i128, original: V) -> Result<T, E>
    where
        E: serde::de::Error,
        V: std::fmt::Display,
    {
        T::try_from(value).map_err(|_| E::invalid_value(Other(&format!("{original}")), &EXPECTING))
    }
}

const EXPECTING: &str = "a 64-bit integer, as a JSON number or a decimal string";

impl<T> serde::de::Visitor<'_> for Int64Visitor<T>
where
    T: TryFrom<i128>,
{
    type Value = T;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str(EXPECTING)
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        // Parsing as `f64` first would round integers just outside the range.
        if let Ok(v) = value.parse::<i128>() {
            return Self::convert(v, value);
        }
        let number = value
            .parse::<f64>()
            .map_err(|_| E::invalid_value(Other(value), &EXPECTING))?;
        self.visit_f64(number)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Self::convert(value as i128, value)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Self::convert(value as i128, value)
    }

    fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Self::convert(value, value)
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        // i128 covers both target ranges, out of range values fail in
        // `convert()`.
        if !value.is_finite()
            || value.fract() != 0.0
            || value < i128::MIN as f64
            || value > i128::MAX as f64
        {
            return Err(E::invalid_value(Other(&format!("{value}")), &EXPECTING));
        }
        Self::convert(value as i128, value)
    }
}

/// Serializes [bytes::Bytes] as base64, and deserializes any base64 flavor.
///
/// Output uses the standard alphabet with padding. Input may use the standard
/// or the URL-safe alphabet, with or without padding.
pub struct Base64;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

impl serde_with::SerializeAs<bytes::Bytes> for Base64 {
    fn serialize_as<S>(source: &bytes::Bytes, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let encoded = base64::prelude::BASE64_STANDARD.encode(source);
        serializer.serialize_str(&encoded)
    }
}

impl<'de> serde_with::DeserializeAs<'de, bytes::Bytes> for Base64 {
    fn deserialize_as<D>(deserializer: D) -> Result<bytes::Bytes, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        use serde::Deserialize;
        use serde::de::Error;
        let encoded = String::deserialize(deserializer)?;
        let engine = if encoded.contains(['-', '_']) {
            &URL_SAFE_LENIENT
        } else {
            &STANDARD_LENIENT
        };
        engine
            .decode(encoded.as_bytes())
            .map(bytes::Bytes::from)
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::{Value, json};
    use serde_with::{DeserializeAs, SerializeAs};
    use test_case::test_case;

    #[test_case(json!(0), 0)]
    #[test_case(json!("0"), 0; "zero string")]
    #[test_case(json!("2.0"), 2)]
    #[test_case(json!(3e5), 300_000)]
    #[test_case(json!("-6e5"), -600_000)]
    #[test_case(json!(-42), -42)]
    #[test_case(json!("-7"), -7)]
    #[test_case(json!(168.0), 168)]
    #[test_case(json!(i64::MAX), i64::MAX; "max")]
    #[test_case(json!(i64::MAX.to_string()), i64::MAX; "max as string")]
    #[test_case(json!(i64::MIN), i64::MIN; "min")]
    #[test_case(json!(i64::MIN.to_string()), i64::MIN; "min as string")]
    fn i64_deser_and_ser(input: Value, want: i64) -> Result<()> {
        let got = I64::deserialize_as(input)?;
        assert_eq!(got, want);

        // Always serialized as a string.
        let serialized = I64::serialize_as(&got, serde_json::value::Serializer)?;
        assert_eq!(serialized, json!(got.to_string()));
        Ok(())
    }

    #[test_case(json!((i64::MAX as i128 + 1).to_string()); "max plus one")]
    #[test_case(json!((i64::MIN as i128 - 1).to_string()); "min minus one")]
    #[test_case(json!(i64::MAX as f64 * 2.0); "double max")]
    #[test_case(json!(u64::MAX); "u64 max")]
    #[test_case(json!("abc"))]
    #[test_case(json!(123.4))]
    #[test_case(json!("-345.6"))]
    #[test_case(json!(true))]
    #[test_case(json!({}))]
    fn i64_deser_error(input: Value) {
        let got = I64::deserialize_as(input).unwrap_err();
        assert!(got.is_data(), "{got:?}");
    }

    #[test_case(json!(0), 0)]
    #[test_case(json!("42"), 42)]
    #[test_case(json!(u64::MAX), u64::MAX; "max")]
    #[test_case(json!(u64::MAX.to_string()), u64::MAX; "max as string")]
    fn u64_deser_and_ser(input: Value, want: u64) -> Result<()> {
        let got = U64::deserialize_as(input)?;
        assert_eq!(got, want);
        let serialized = U64::serialize_as(&got, serde_json::value::Serializer)?;
        assert_eq!(serialized, json!(want.to_string()));
        Ok(())
    }

    #[test_case(json!(-1))]
    #[test_case(json!("-1"))]
    #[test_case(json!((u64::MAX as i128 + 1).to_string()); "max plus one")]
    fn u64_deser_error(input: Value) {
        let got = U64::deserialize_as(input).unwrap_err();
        assert!(got.is_data(), "{got:?}");
    }

    #[test_case("SGVsbG8gV29ybGQh", b"Hello World!"; "standard")]
    #[test_case("", b""; "empty")]
    #[test_case("+/8=", &[0xfb, 0xff]; "standard padded")]
    #[test_case("+/8", &[0xfb, 0xff]; "standard unpadded")]
    #[test_case("-_8=", &[0xfb, 0xff]; "url safe padded")]
    #[test_case("-_8", &[0xfb, 0xff]; "url safe unpadded")]
    fn base64_deser(input: &str, want: &[u8]) -> Result<()> {
        let got = Base64::deserialize_as(json!(input))?;
        assert_eq!(got.as_ref(), want);
        Ok(())
    }

    #[test]
    fn base64_ser() -> Result<()> {
        let input = bytes::Bytes::from_static(&[0xfb, 0xff]);
        let got = Base64::serialize_as(&input, serde_json::value::Serializer)?;
        assert_eq!(got, json!("+/8="));
        Ok(())
    }

    #[test_case(json!("not base64!"))]
    #[test_case(json!("+/-_"); "mixed alphabets")]
    #[test_case(json!(123))]
    fn base64_deser_error(input: Value) {
        let got = Base64::deserialize_as(input);
        assert!(got.is_err(), "{got:?}");
    }
}
