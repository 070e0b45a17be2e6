//! yamlgrab - path-addressable queries over YAML and JSON documents.
//!
//! Decoded documents are generic [`Value`] trees. [`normalize`] turns any
//! tree into its canonical form, and [`grab`] walks a tree along a
//! [`Path`] to the value it addresses.
//!
//! ```
//! use yamlgrab::{grab, parse_json, Path, PathSegment, Value};
//!
//! let root = parse_json(r#"{"a": {"b": 5}}"#, false).unwrap();
//! let path = Path::new(vec![PathSegment::key("a"), PathSegment::key("b")]);
//! assert_eq!(grab(&root, &path).unwrap(), Value::from(5));
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod yamlpath;

pub use document::parser::{parse_json, parse_yaml_documents};
pub use document::{as_record_sequence, normalize, Kind, Mapping, Scalar, Value};
pub use yamlpath::{grab, grab_ref, grab_str, list_paths, GrabError, Path, PathSegment};
