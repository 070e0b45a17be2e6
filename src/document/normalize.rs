//! Canonicalization of decoded trees.
//!
//! Decoders disagree on how mappings look: YAML keeps key order, plain JSON
//! does not. [`normalize`] rewrites a tree so that every mapping is an ordered
//! [`Mapping`] and every list of mappings is a [`Value::Records`]. Unordered
//! mappings are sorted by key, at every depth, so two equal documents decoded
//! through different decoders normalize to identical trees.

use super::node::{Mapping, Value};
use std::collections::HashMap;

/// Returns the canonical form of `value`.
///
/// Normalization is total and idempotent: normalizing an already normalized
/// tree yields an identical tree.
///
/// # Example
///
/// ```
/// use yamlgrab::document::node::Value;
/// use yamlgrab::document::normalize::normalize;
/// use std::collections::HashMap;
///
/// let mut map = HashMap::new();
/// map.insert("b".to_string(), Value::from(2));
/// map.insert("a".to_string(), Value::from(1));
///
/// match normalize(&Value::Unordered(map)) {
///     Value::Mapping(m) => assert_eq!(m.keys().collect::<Vec<_>>(), ["a", "b"]),
///     other => panic!("expected mapping, got {:?}", other),
/// }
/// ```
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(normalize_mapping(map)),
        Value::Unordered(map) => Value::Mapping(sorted_mapping(map)),
        Value::Sequence(items) => {
            let items: Vec<Value> = items.iter().map(normalize).collect();
            if is_complex_list(&items) {
                Value::Records(into_records(items))
            } else {
                Value::Sequence(items)
            }
        }
        Value::Records(records) => Value::Records(records.iter().map(normalize_mapping).collect()),
        Value::Scalar(_) => value.clone(),
    }
}

/// Classifies `value` as a complex list.
///
/// Record sequences are returned as they are. A plain sequence qualifies when
/// it is non-empty and every element is a mapping; each element is then
/// converted to an ordered [`Mapping`]. Anything else yields `None`.
pub fn as_record_sequence(value: &Value) -> Option<Vec<Mapping>> {
    match value {
        Value::Records(records) => Some(records.clone()),
        Value::Sequence(items) if is_complex_list(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::Mapping(map) => Some(normalize_mapping(map)),
                    Value::Unordered(map) => Some(sorted_mapping(map)),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

/// Returns true if `items` is non-empty and holds only mappings.
pub fn is_complex_list(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_mapping)
}

fn normalize_mapping(map: &Mapping) -> Mapping {
    map.iter()
        .map(|(key, value)| (key.clone(), normalize(value)))
        .collect()
}

/// Converts an unordered mapping, sorting keys ascending.
pub(crate) fn sorted_mapping(map: &HashMap<String, Value>) -> Mapping {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    keys.into_iter()
        .map(|key| (key.clone(), normalize(&map[key])))
        .collect()
}

/// Unwraps already-normalized mapping elements.
fn into_records(items: Vec<Value>) -> Vec<Mapping> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Mapping(map) => Some(map),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::Scalar;

    fn unordered(entries: &[(&str, Value)]) -> Value {
        Value::Unordered(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    fn keys_of(value: &Value) -> Vec<String> {
        match value {
            Value::Mapping(map) => map.keys().cloned().collect(),
            other => panic!("Expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_passes_through() {
        let value = Value::Scalar(Scalar::Null);
        assert_eq!(normalize(&value), value);
    }

    #[test]
    fn test_ordered_mapping_keeps_order() {
        let mut map = Mapping::new();
        map.insert("zeta".to_string(), Value::from(1));
        map.insert("alpha".to_string(), Value::from(2));

        let normalized = normalize(&Value::Mapping(map));
        assert_eq!(keys_of(&normalized), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_unordered_mapping_sorted_recursively() {
        let inner = unordered(&[("y", Value::from(1)), ("x", Value::from(2))]);
        let outer = unordered(&[("b", inner), ("a", Value::from(3))]);

        let normalized = normalize(&outer);
        assert_eq!(keys_of(&normalized), vec!["a", "b"]);
        assert_eq!(keys_of(normalized.get("b").unwrap()), vec!["x", "y"]);
    }

    #[test]
    fn test_sequence_of_mappings_becomes_records() {
        let list = Value::Sequence(vec![
            unordered(&[("name", Value::from("a"))]),
            unordered(&[("name", Value::from("b"))]),
        ]);

        match normalize(&list) {
            Value::Records(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[1].get("name"), Some(&Value::from("b")));
            }
            other => panic!("Expected records, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_sequence_stays_plain() {
        let list = Value::Sequence(vec![
            unordered(&[("name", Value::from("a"))]),
            Value::from(1),
        ]);

        match normalize(&list) {
            Value::Sequence(items) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(items[0], Value::Mapping(_)));
            }
            other => panic!("Expected plain sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sequence_stays_plain() {
        assert_eq!(
            normalize(&Value::Sequence(vec![])),
            Value::Sequence(vec![])
        );
    }

    #[test]
    fn test_classifier_rejects_empty_and_scalars() {
        assert!(as_record_sequence(&Value::Sequence(vec![])).is_none());
        assert!(as_record_sequence(&Value::Sequence(vec![Value::from(1), Value::from(2)])).is_none());
        assert!(as_record_sequence(&Value::from("x")).is_none());
        assert!(as_record_sequence(&unordered(&[])).is_none());
    }

    #[test]
    fn test_classifier_converts_unordered_entries() {
        let list = Value::Sequence(vec![unordered(&[
            ("v", Value::from(1)),
            ("name", Value::from("x")),
        ])]);

        let records = as_record_sequence(&list).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].keys().collect::<Vec<_>>(),
            vec!["name", "v"]
        );
    }

    #[test]
    fn test_classifier_returns_records_unchanged() {
        let mut record = Mapping::new();
        record.insert("name".to_string(), Value::from("x"));
        let records = Value::Records(vec![record.clone()]);

        assert_eq!(as_record_sequence(&records), Some(vec![record]));
    }
}
