//! Snapshots of a traced value.
//!
//! Taking a snapshot serializes the value into an owned [`Value`] tree. The
//! tree shares nothing with the source, so later mutation of the source can
//! never leak into a snapshot already taken.

use crate::error::{TraceError, TraceResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Deep copy of a traced value at one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Value);

impl Snapshot {
    /// Deep-copy `value` into a new snapshot
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be represented as a JSON tree
    /// (for example a map whose keys are not strings or numbers)
    pub fn capture<T: Serialize + ?Sized>(value: &T) -> TraceResult<Self> {
        serde_json::to_value(value)
            .map(Self)
            .map_err(TraceError::Capture)
    }

    /// Borrow the captured tree
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Top-level keys, in order.
    ///
    /// Objects yield their member names, arrays their decimal indices.
    /// Scalars and `null` have no keys.
    #[must_use]
    pub fn top_level_keys(&self) -> Vec<String> {
        match &self.0 {
            Value::Object(map) => map.keys().cloned().collect(),
            Value::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    /// Look up a top-level entry by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.0 {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Decode the snapshot back into a typed value
    ///
    /// # Errors
    ///
    /// Returns error if the tree does not match `D`
    pub fn decode<D: DeserializeOwned>(&self) -> TraceResult<D> {
        D::deserialize(&self.0).map_err(TraceError::Decode)
    }
}

impl From<Value> for Snapshot {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl PartialEq<Value> for Snapshot {
    fn eq(&self, other: &Value) -> bool {
        &self.0 == other
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: u32,
        tags: Vec<String>,
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("not capturable"))
        }
    }

    #[test]
    fn test_capture_struct() {
        let counter = Counter {
            count: 3,
            tags: vec!["a".to_string()],
        };
        let snapshot = Snapshot::capture(&counter).unwrap();
        assert_eq!(snapshot, json!({"count": 3, "tags": ["a"]}));
    }

    #[test]
    fn test_capture_is_independent() {
        let mut counter = Counter {
            count: 1,
            tags: vec!["x".to_string()],
        };
        let snapshot = Snapshot::capture(&counter).unwrap();

        counter.count = 99;
        counter.tags.push("y".to_string());

        assert_eq!(snapshot, json!({"count": 1, "tags": ["x"]}));
    }

    #[test]
    fn test_capture_failure() {
        let err = Snapshot::capture(&Unserializable).unwrap_err();
        assert!(matches!(err, TraceError::Capture(_)));
    }

    #[test]
    fn test_capture_rejects_composite_map_keys() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "pair");
        assert!(Snapshot::capture(&map).is_err());
    }

    #[test]
    fn test_top_level_keys_object_preserves_order() {
        let snapshot = Snapshot::from(json!({"zeta": 1, "alpha": 2, "mid": null}));
        assert_eq!(snapshot.top_level_keys(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_top_level_keys_array_and_scalar() {
        let snapshot = Snapshot::from(json!(["a", "b"]));
        assert_eq!(snapshot.top_level_keys(), vec!["0", "1"]);
        assert_eq!(snapshot.get("1"), Some(&json!("b")));

        assert!(Snapshot::from(json!(5)).top_level_keys().is_empty());
        assert!(Snapshot::from(Value::Null).top_level_keys().is_empty());
    }

    #[test]
    fn test_decode_roundtrip() {
        let counter = Counter {
            count: 2,
            tags: vec![],
        };
        let snapshot = Snapshot::capture(&counter).unwrap();
        let decoded: Counter = snapshot.decode().unwrap();
        assert_eq!(decoded, counter);
    }

    #[test]
    fn test_decode_mismatch() {
        let snapshot = Snapshot::from(json!({"count": "three"}));
        let err = snapshot.decode::<Counter>().unwrap_err();
        assert!(matches!(err, TraceError::Decode(_)));
    }
}
