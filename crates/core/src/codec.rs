//! Coercion codec: typed values to and from persisted strings
//!
//! The persisted form of every value is a plain string. Writing picks the
//! string form from the value's variant; reading has no type information at
//! all and runs a best-effort inference over the raw string. Per-key
//! overrides short-circuit either direction.
//!
//! ## Inference policy (read side)
//!
//! 1. A `{` or `[` prefix means structural JSON. A decode failure is
//!    recovered locally: a diagnostic warning, and the raw string comes
//!    back unchanged.
//! 2. A string made only of `0-9`, `.` and `-` is coerced numerically:
//!    `i64` first, then `f64`. When the float's canonical shortest
//!    rendering carries an exponent marker, the original digits are
//!    re-parsed as an arbitrary-precision integer so no precision is lost.
//! 3. Everything else is a string.
//!
//! The policy is lossy on purpose: `"42"` written as a string reads back
//! as the number 42 unless the key carries an override decoder.

use num_bigint::BigInt;
use std::collections::HashMap;
use tracing::warn;

use crate::error::{Error, Result};
use crate::value::Value;

/// Per-key override encoder: sole authority for the key's persisted string
pub type EncodeFn = Box<dyn Fn(&Value) -> String + Send + Sync>;

/// Per-key override decoder: sole authority for the key's typed value
pub type DecodeFn = Box<dyn Fn(&str) -> Value + Send + Sync>;

#[derive(Default)]
struct Override {
    encode: Option<EncodeFn>,
    decode: Option<DecodeFn>,
}

/// Per-key override table, immutable once handed to a [`ValueCodec`]
///
/// Either side of a key's pair may be present independently: a key can have
/// a custom encoder while reads still run default inference, or vice versa.
///
/// # Example
///
/// ```
/// use lodestore_core::codec::Overrides;
/// use lodestore_core::value::Value;
///
/// let overrides = Overrides::new()
///     .with_encoder("flag", |v| match v {
///         Value::Bool(true) => "yes".to_string(),
///         _ => "no".to_string(),
///     })
///     .with_decoder("flag", |raw| Value::Bool(raw == "yes"));
/// ```
#[derive(Default)]
pub struct Overrides {
    table: HashMap<String, Override>,
}

impl Overrides {
    /// Create an empty override table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override encoder for `key`
    pub fn with_encoder(
        mut self,
        key: impl Into<String>,
        encode: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.table.entry(key.into()).or_default().encode = Some(Box::new(encode));
        self
    }

    /// Register an override decoder for `key`
    pub fn with_decoder(
        mut self,
        key: impl Into<String>,
        decode: impl Fn(&str) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.table.entry(key.into()).or_default().decode = Some(Box::new(decode));
        self
    }

    fn encoder(&self, key: &str) -> Option<&EncodeFn> {
        self.table.get(key).and_then(|o| o.encode.as_ref())
    }

    fn decoder(&self, key: &str) -> Option<&DecodeFn> {
        self.table.get(key).and_then(|o| o.decode.as_ref())
    }
}

/// Coercion codec combining default rules with a per-key override table
#[derive(Default)]
pub struct ValueCodec {
    overrides: Overrides,
}

impl ValueCodec {
    /// Create a codec with the given override table
    pub fn new(overrides: Overrides) -> Self {
        Self { overrides }
    }

    /// Encode a typed value to its persisted string
    ///
    /// An override encoder for `key` is the sole authority; its output is
    /// returned unmodified, with no validation. Default encoding: strings
    /// pass through, arrays and objects become JSON, the remaining scalar
    /// variants use their canonical textual form.
    ///
    /// # Errors
    ///
    /// `Error::UnsupportedType` when the value has no default string form
    /// (`Null`, `Bytes`) and no override encoder is registered.
    pub fn encode(&self, key: &str, value: &Value) -> Result<String> {
        if let Some(encode) = self.overrides.encoder(key) {
            return Ok(encode(value));
        }
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Array(_) | Value::Object(_) => {
                Ok(serde_json::Value::from(value.clone()).to_string())
            }
            Value::Bool(b) => Ok(b.to_string()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(f) => Ok(f.to_string()),
            Value::BigInt(b) => Ok(b.to_string()),
            Value::Null | Value::Bytes(_) => Err(Error::UnsupportedType {
                key: key.to_string(),
                type_name: value.type_name(),
            }),
        }
    }

    /// Decode a persisted string back to a typed value
    ///
    /// Absence is handled a level up, in the typed store; `raw` here is
    /// always a present entry. An override decoder for `key` is the sole
    /// authority; otherwise the inference policy in the module docs runs.
    /// Decoding never fails: malformed JSON is recovered as the raw string.
    pub fn decode(&self, key: &str, raw: &str) -> Value {
        if let Some(decode) = self.overrides.decoder(key) {
            return decode(raw);
        }
        if raw.starts_with('{') || raw.starts_with('[') {
            return match serde_json::from_str::<serde_json::Value>(raw) {
                Ok(json) => Value::from(json),
                Err(error) => {
                    warn!(
                        target: "lodestore::codec",
                        key,
                        error = %error,
                        "malformed persisted JSON, returning raw string"
                    );
                    Value::String(raw.to_string())
                }
            };
        }
        if raw.bytes().all(|b| b.is_ascii_digit() || b == b'.' || b == b'-') {
            return infer_number(raw);
        }
        Value::String(raw.to_string())
    }
}

/// Numeric coercion for strings that passed the numeric-character scan
///
/// Exponential canonical forms signal an integer too large for `f64` to
/// round-trip, so the original digits are kept via `BigInt`. A fractional
/// input whose canonical form is exponential (`"0.0000001"` renders as
/// `1e-7`) cannot be an integer; the parsed float is kept for those.
fn infer_number(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    let Ok(f) = raw.parse::<f64>() else {
        // Passed the character scan but is not a number: "-", ".", "1.2.3"
        return Value::String(raw.to_string());
    };
    let canonical = serde_json::Value::from(f).to_string();
    if canonical.contains('e') {
        if let Ok(big) = raw.parse::<BigInt>() {
            return Value::BigInt(big);
        }
    }
    Value::Float(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> ValueCodec {
        ValueCodec::default()
    }

    // ========== Default encoding ==========

    #[test]
    fn test_encode_string_passes_through() {
        let raw = codec().encode("k", &Value::String("plain text".into())).unwrap();
        assert_eq!(raw, "plain text");
    }

    #[test]
    fn test_encode_scalars_use_textual_form() {
        let c = codec();
        assert_eq!(c.encode("k", &Value::Bool(true)).unwrap(), "true");
        assert_eq!(c.encode("k", &Value::Int(-7)).unwrap(), "-7");
        assert_eq!(c.encode("k", &Value::Float(3.5)).unwrap(), "3.5");
        assert_eq!(
            c.encode("k", &Value::BigInt("99999999999999999999".parse().unwrap()))
                .unwrap(),
            "99999999999999999999"
        );
    }

    #[test]
    fn test_encode_array_as_json() {
        let raw = codec()
            .encode("k", &Value::Array(vec![Value::Int(1), Value::Int(2)]))
            .unwrap();
        assert_eq!(raw, "[1,2]");
    }

    #[test]
    fn test_encode_object_as_json() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), Value::Int(1));
        let raw = codec().encode("k", &Value::Object(map)).unwrap();
        assert_eq!(raw, r#"{"a":1}"#);
    }

    #[test]
    fn test_encode_null_is_unsupported() {
        let err = codec().encode("k", &Value::Null).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { type_name: "Null", .. }));
    }

    #[test]
    fn test_encode_bytes_is_unsupported() {
        let err = codec().encode("k", &Value::Bytes(vec![1])).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { type_name: "Bytes", .. }));
    }

    // ========== Default inference ==========

    #[test]
    fn test_decode_plain_string() {
        assert_eq!(
            codec().decode("k", "hello world"),
            Value::String("hello world".into())
        );
    }

    #[test]
    fn test_decode_integer() {
        assert_eq!(codec().decode("k", "42"), Value::Int(42));
    }

    #[test]
    fn test_decode_negative_integer() {
        assert_eq!(codec().decode("k", "-42"), Value::Int(-42));
    }

    #[test]
    fn test_decode_leading_zero_integer() {
        assert_eq!(codec().decode("k", "007"), Value::Int(7));
    }

    #[test]
    fn test_decode_float() {
        assert_eq!(codec().decode("k", "3.25"), Value::Float(3.25));
    }

    #[test]
    fn test_decode_mixed_alphanumeric_stays_string() {
        // Fails the all-numeric-characters scan
        assert_eq!(
            codec().decode("k", "abc123"),
            Value::String("abc123".into())
        );
    }

    #[test]
    fn test_decode_huge_integer_falls_back_to_bigint() {
        let raw = "123456789012345678901234567890";
        let expected: BigInt = raw.parse().unwrap();
        assert_eq!(codec().decode("k", raw), Value::BigInt(expected));
    }

    #[test]
    fn test_decode_tiny_fraction_keeps_float() {
        // Canonical form is 1e-7, but a BigInt cannot hold a fraction
        assert_eq!(codec().decode("k", "0.0000001"), Value::Float(0.0000001));
    }

    #[test]
    fn test_decode_lone_minus_stays_string() {
        assert_eq!(codec().decode("k", "-"), Value::String("-".into()));
    }

    #[test]
    fn test_decode_lone_dot_stays_string() {
        assert_eq!(codec().decode("k", "."), Value::String(".".into()));
    }

    #[test]
    fn test_decode_double_dotted_stays_string() {
        assert_eq!(codec().decode("k", "1.2.3"), Value::String("1.2.3".into()));
    }

    #[test]
    fn test_decode_dash_separated_stays_string() {
        // Passes the character scan, fails the parse
        assert_eq!(codec().decode("k", "12-34"), Value::String("12-34".into()));
    }

    #[test]
    fn test_decode_empty_string_stays_string() {
        assert_eq!(codec().decode("k", ""), Value::String(String::new()));
    }

    #[test]
    fn test_decode_json_object() {
        let v = codec().decode("k", r#"{"name":"ada","age":36}"#);
        let obj = v.as_object().unwrap();
        assert_eq!(obj.get("name"), Some(&Value::String("ada".into())));
        assert_eq!(obj.get("age"), Some(&Value::Int(36)));
    }

    #[test]
    fn test_decode_json_array() {
        assert_eq!(
            codec().decode("k", "[1,2,3]"),
            Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn test_decode_malformed_json_recovers_raw_string() {
        assert_eq!(
            codec().decode("k", "{not valid json"),
            Value::String("{not valid json".into())
        );
        assert_eq!(
            codec().decode("k", "[1,2,"),
            Value::String("[1,2,".into())
        );
    }

    // ========== Round trips ==========

    #[test]
    fn test_roundtrip_object() {
        let c = codec();
        let mut map = HashMap::new();
        map.insert("xs".to_string(), Value::Array(vec![Value::Int(1)]));
        let original = Value::Object(map);
        let raw = c.encode("k", &original).unwrap();
        assert_eq!(c.decode("k", &raw), original);
    }

    #[test]
    fn test_roundtrip_bigint() {
        let c = codec();
        let original = Value::BigInt("123456789012345678901234567890".parse().unwrap());
        let raw = c.encode("k", &original).unwrap();
        assert_eq!(c.decode("k", &raw), original);
    }

    #[test]
    fn test_numeric_looking_string_does_not_roundtrip() {
        // The documented lossy case: a string "42" comes back as a number
        let c = codec();
        let raw = c.encode("k", &Value::String("42".into())).unwrap();
        assert_eq!(c.decode("k", &raw), Value::Int(42));
    }

    #[test]
    fn test_whole_float_comes_back_as_int() {
        // 42.0 encodes as "42", which reads back as an integer
        let c = codec();
        let raw = c.encode("k", &Value::Float(42.0)).unwrap();
        assert_eq!(raw, "42");
        assert_eq!(c.decode("k", &raw), Value::Int(42));
    }

    // ========== Override precedence ==========

    #[test]
    fn test_override_encoder_is_sole_authority() {
        let c = ValueCodec::new(Overrides::new().with_encoder("k", |_| "fixed".to_string()));
        assert_eq!(c.encode("k", &Value::Int(42)).unwrap(), "fixed");
        // Even values default encoding rejects go through the override
        assert_eq!(c.encode("k", &Value::Null).unwrap(), "fixed");
    }

    #[test]
    fn test_override_decoder_beats_numeric_inference() {
        let c = ValueCodec::new(
            Overrides::new().with_decoder("k", |raw| Value::String(raw.to_string())),
        );
        // Default inference would produce Int(42)
        assert_eq!(c.decode("k", "42"), Value::String("42".into()));
    }

    #[test]
    fn test_override_applies_only_to_its_key() {
        let c = ValueCodec::new(
            Overrides::new().with_decoder("custom", |_| Value::Bool(true)),
        );
        assert_eq!(c.decode("custom", "42"), Value::Bool(true));
        assert_eq!(c.decode("other", "42"), Value::Int(42));
    }

    #[test]
    fn test_override_sides_are_independent() {
        // Decoder only: writes still use default encoding
        let c = ValueCodec::new(
            Overrides::new().with_decoder("k", |raw| Value::String(raw.to_uppercase())),
        );
        assert_eq!(c.encode("k", &Value::String("abc".into())).unwrap(), "abc");
        assert_eq!(c.decode("k", "abc"), Value::String("ABC".into()));
    }

    // ========== Property tests ==========

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Inference is total: any string decodes without panicking
            #[test]
            fn decode_never_panics(raw in ".*") {
                let _ = codec().decode("k", &raw);
            }

            // Strings with no numeric or structural shape round-trip exactly
            #[test]
            fn non_coercible_strings_roundtrip(s in "[a-zA-Z ]+") {
                let c = codec();
                let raw = c.encode("k", &Value::String(s.clone())).unwrap();
                prop_assert_eq!(c.decode("k", &raw), Value::String(s));
            }

            // i64-range integers always come back as Int
            #[test]
            fn i64_strings_decode_to_int(i in any::<i64>()) {
                prop_assert_eq!(codec().decode("k", &i.to_string()), Value::Int(i));
            }
        }
    }
}
