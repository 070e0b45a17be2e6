//! Decoding YAML and JSON into [`Value`] trees, and encoding them back.
//!
//! YAML mappings keep their key order and become [`Value::Mapping`]. JSON can
//! be decoded two ways: the plain decode produces [`Value::Unordered`]
//! objects, the ordered decode keeps the key order found in the text.
//!
//! # Example
//!
//! ```
//! use yamlgrab::document::parser::parse_yaml_documents;
//!
//! let docs = parse_yaml_documents("---\na: 1\n---\nb: 2\n").unwrap();
//! assert_eq!(docs.len(), 2);
//! assert!(docs[0].is_mapping());
//! ```

use super::node::{Mapping, Scalar, Value};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Parses every document of a YAML stream.
///
/// An empty stream yields a single null document.
///
/// # Errors
///
/// Returns an error if any document is not valid YAML, or if two keys of one
/// mapping render to the same text (`1` and `"1"`). The message names the
/// zero-based index of the failing document.
pub fn parse_yaml_documents(yaml_str: &str) -> Result<Vec<Value>> {
    let mut documents = Vec::new();

    for (idx, document) in serde_yaml::Deserializer::from_str(yaml_str).enumerate() {
        let value = YamlValue::deserialize(document)
            .map_err(anyhow::Error::from)
            .and_then(|yaml_value| from_yaml(&yaml_value))
            .with_context(|| format!("Failed to parse YAML document #{}", idx))?;
        documents.push(value);
    }

    if documents.is_empty() {
        documents.push(Value::Scalar(Scalar::Null));
    }

    Ok(documents)
}

/// Parses a single JSON document.
///
/// With `ordered` set, object keys keep the order they appear in the text.
/// Otherwise objects are decoded as unordered mappings and only get a stable
/// order once normalized. Both modes accept the same inputs; a repeated key
/// keeps its last value.
pub fn parse_json(json_str: &str, ordered: bool) -> Result<Value> {
    let json_value: JsonValue = serde_json::from_str(json_str).context("Failed to parse JSON")?;
    if ordered {
        Ok(from_json_ordered(&json_value))
    } else {
        Ok(from_json(&json_value))
    }
}

/// Converts a `serde_yaml::Value` into a [`Value`].
///
/// Mapping keys that are not strings are rendered to their scalar text.
/// Tags are dropped and the tagged value is converted in its place.
///
/// # Errors
///
/// Fails when two keys of a mapping render to the same text, since only one
/// of them could be kept.
pub fn from_yaml(value: &YamlValue) -> Result<Value> {
    Ok(match value {
        YamlValue::Null => Value::Scalar(Scalar::Null),
        YamlValue::Bool(b) => Value::Scalar(Scalar::Bool(*b)),
        YamlValue::Number(n) => Value::Scalar(yaml_number(n)),
        YamlValue::String(s) => Value::Scalar(Scalar::String(s.clone())),
        YamlValue::Sequence(items) => {
            Value::Sequence(items.iter().map(from_yaml).collect::<Result<_>>()?)
        }
        YamlValue::Mapping(map) => {
            let mut mapping = Mapping::with_capacity(map.len());
            for (k, v) in map {
                let key = yaml_key(k);
                if mapping.contains_key(&key) {
                    bail!("mapping key '{}' occurs twice once keys are read as text", key);
                }
                mapping.insert(key, from_yaml(v)?);
            }
            Value::Mapping(mapping)
        }
        YamlValue::Tagged(tagged) => from_yaml(&tagged.value)?,
    })
}

/// Converts a `serde_json::Value` into a [`Value`] with unordered objects.
pub fn from_json(value: &JsonValue) -> Value {
    convert_json(value, false)
}

/// Converts a `serde_json::Value` into a [`Value`], keeping object key order.
pub fn from_json_ordered(value: &JsonValue) -> Value {
    convert_json(value, true)
}

fn convert_json(value: &JsonValue, ordered: bool) -> Value {
    match value {
        JsonValue::Null => Value::Scalar(Scalar::Null),
        JsonValue::Bool(b) => Value::Scalar(Scalar::Bool(*b)),
        JsonValue::Number(n) => Value::Scalar(json_number(n)),
        JsonValue::String(s) => Value::Scalar(Scalar::String(s.clone())),
        JsonValue::Array(items) => Value::Sequence(
            items
                .iter()
                .map(|item| convert_json(item, ordered))
                .collect(),
        ),
        JsonValue::Object(map) => {
            let entries = map.iter().map(|(k, v)| (k.clone(), convert_json(v, ordered)));
            if ordered {
                Value::Mapping(entries.collect())
            } else {
                Value::Unordered(entries.collect())
            }
        }
    }
}

/// Converts a [`Value`] into a `serde_yaml::Value` for output.
///
/// Unordered mappings are emitted with their keys sorted.
pub fn to_yaml(value: &Value) -> YamlValue {
    match value {
        Value::Mapping(map) => YamlValue::Mapping(
            map.iter()
                .map(|(k, v)| (YamlValue::String(k.clone()), to_yaml(v)))
                .collect(),
        ),
        Value::Unordered(_) => to_yaml(&super::normalize::normalize(value)),
        Value::Sequence(items) => YamlValue::Sequence(items.iter().map(to_yaml).collect()),
        Value::Records(records) => YamlValue::Sequence(
            records
                .iter()
                .map(|record| to_yaml(&Value::Mapping(record.clone())))
                .collect(),
        ),
        Value::Scalar(scalar) => match scalar {
            Scalar::Null => YamlValue::Null,
            Scalar::Bool(b) => YamlValue::Bool(*b),
            Scalar::Int(i) => YamlValue::Number(serde_yaml::Number::from(*i)),
            Scalar::UInt(u) => YamlValue::Number(serde_yaml::Number::from(*u)),
            Scalar::Float(f) => YamlValue::Number(serde_yaml::Number::from(*f)),
            Scalar::String(s) => YamlValue::String(s.clone()),
        },
    }
}

/// Converts a [`Value`] into a `serde_json::Value` for output.
///
/// Key order is kept; unordered mappings are emitted with their keys sorted.
/// Non-finite floats have no JSON representation and become `null`.
pub fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::Mapping(map) => JsonValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect(),
        ),
        Value::Unordered(_) => to_json(&super::normalize::normalize(value)),
        Value::Sequence(items) => JsonValue::Array(items.iter().map(to_json).collect()),
        Value::Records(records) => JsonValue::Array(
            records
                .iter()
                .map(|record| {
                    JsonValue::Object(
                        record
                            .iter()
                            .map(|(k, v)| (k.clone(), to_json(v)))
                            .collect(),
                    )
                })
                .collect(),
        ),
        Value::Scalar(scalar) => match scalar {
            Scalar::Null => JsonValue::Null,
            Scalar::Bool(b) => JsonValue::Bool(*b),
            Scalar::Int(i) => JsonValue::from(*i),
            Scalar::UInt(u) => JsonValue::from(*u),
            Scalar::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Scalar::String(s) => JsonValue::String(s.clone()),
        },
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Int(i)
    } else if let Some(u) = n.as_u64() {
        Scalar::UInt(u)
    } else {
        Scalar::Float(n.as_f64().unwrap_or(0.0))
    }
}

fn json_number(n: &serde_json::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Int(i)
    } else if let Some(u) = n.as_u64() {
        Scalar::UInt(u)
    } else {
        Scalar::Float(n.as_f64().unwrap_or(0.0))
    }
}

fn yaml_key(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
