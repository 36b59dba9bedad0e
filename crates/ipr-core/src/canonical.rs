//! # Canonical Serialization -- Deterministic Byte Production
//!
//! Defines [`CanonicalBytes`], the sole construction path for bytes used
//! in digest computation across the workspace.
//!
//! ## Invariant
//!
//! The newtype has a private inner field. The only way to construct it is
//! through [`CanonicalBytes::new()`], which serializes through a
//! `serde_json::Value` tree with lexicographically sorted object keys and
//! compact separators. Any function that pins or hashes a metadata
//! document must accept `&CanonicalBytes`, so the bytes that reach the
//! pinning gateway and the bytes that feed the on-chain integrity digest
//! are the same value, produced once.
//!
//! Floating-point numbers are permitted (creator contribution percentages
//! may be decimal); serde_json renders them with the shortest
//! round-trippable representation, which is stable for a given value.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by canonical JSON serialization: sorted
/// object keys, compact separators, UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// This is the ONLY way to construct `CanonicalBytes`. All digest
    /// computation in the workspace must flow through this constructor.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::SerializationFailed`] if the value
    /// cannot be represented as JSON (e.g. a map with non-string keys).
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        Ok(Self(serialize_canonical(&value)?))
    }

    /// Access the canonical bytes for digest computation or upload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Serialize a JSON value with sorted keys and compact separators.
///
/// `serde_json::Map` is backed by a `BTreeMap` (the `preserve_order`
/// feature is not enabled anywhere in this workspace), so object keys in
/// the `Value` tree are already lexicographically sorted and `to_vec`
/// produces compact output.
fn serialize_canonical(value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
    Ok(serde_json::to_vec(value)?)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating arbitrary JSON-compatible values.
    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9_ ]{0,40}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,10}", inner, 0..8).prop_map(|m| {
                    let map: serde_json::Map<String, Value> = m.into_iter().collect();
                    Value::Object(map)
                }),
            ]
        })
    }

    proptest! {
        /// Canonicalization is deterministic: same input, same bytes.
        #[test]
        fn deterministic(value in json_value()) {
            let a = CanonicalBytes::new(&value).unwrap();
            let b = CanonicalBytes::new(&value).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        /// Canonical bytes are valid UTF-8.
        #[test]
        fn valid_utf8(value in json_value()) {
            let cb = CanonicalBytes::new(&value).unwrap();
            prop_assert!(std::str::from_utf8(cb.as_bytes()).is_ok());
        }

        /// Canonical bytes round-trip through serde_json.
        #[test]
        fn valid_json(value in json_value()) {
            let cb = CanonicalBytes::new(&value).unwrap();
            let parsed: Result<Value, _> = serde_json::from_slice(cb.as_bytes());
            prop_assert!(parsed.is_ok());
        }

        /// Object keys are sorted lexicographically in the output.
        #[test]
        fn sorted_keys(keys in prop::collection::btree_set("[a-z]{1,8}", 2..6)) {
            let map: serde_json::Map<String, Value> = keys
                .iter()
                .enumerate()
                .map(|(i, k)| (k.clone(), serde_json::json!(i)))
                .collect();
            let cb = CanonicalBytes::new(&Value::Object(map)).unwrap();
            let s = std::str::from_utf8(cb.as_bytes()).unwrap();

            let parsed: serde_json::Map<String, Value> = serde_json::from_str(s).unwrap();
            let output_keys: Vec<&String> = parsed.keys().collect();
            let mut sorted = output_keys.clone();
            sorted.sort();
            prop_assert_eq!(output_keys, sorted);
        }
    }
}
