//! Path addressing for YAML and JSON document trees.
//!
//! A [`Path`] is a sequence of segments rooted in one document of a stream.
//! Three kinds of segment exist:
//!
//! - `MapKey` - the value stored under a key of a mapping
//! - `RecordByField` - the single entry of a complex list whose field holds a value
//! - `IndexAt` - the element at a position of a list
//!
//! [`grab`] walks a tree along a path and returns the normalized value found
//! there, or a [`GrabError`] naming the kind it expected, the kind it found and
//! how far it got.
//!
//! # Examples
//!
//! ```
//! // /spec/containers/name=web/image - image of the container named web
//! // spec.containers.web.image       - same, dot style
//! // #1/metadata/name                - metadata name of the second document
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{Path, PathSegment};
pub use error::{GrabError, PathParseError, QueryError};
pub use evaluator::{grab, grab_ref, Evaluator, Node, DEFAULT_IDENTIFIERS};
pub use parser::Parser;

use crate::document::node::Value;

/// Parses `query` against `root` and returns the value it addresses.
///
/// ```
/// use yamlgrab::document::parser::parse_yaml_documents;
/// use yamlgrab::yamlpath::grab_str;
/// use yamlgrab::Value;
///
/// let docs = parse_yaml_documents("jobs:\n- name: test\n  plan: [lint]\n").unwrap();
/// assert_eq!(grab_str(&docs[0], "jobs.test.plan.0").unwrap(), Value::from("lint"));
/// assert_eq!(grab_str(&docs[0], "/jobs/name=test/plan/0").unwrap(), Value::from("lint"));
/// ```
pub fn grab_str(root: &Value, query: &str) -> Result<Value, QueryError> {
    let path = Parser::parse_in(query, root, DEFAULT_IDENTIFIERS)?;
    Ok(grab(root, &path)?)
}

/// Lists the path of every leaf of `root`, a single document.
///
/// Complex list entries are named through [`DEFAULT_IDENTIFIERS`]; use
/// [`Evaluator::leaf_paths`] to pick other fields or a document index.
///
/// ```
/// use yamlgrab::document::parser::parse_yaml_documents;
/// use yamlgrab::yamlpath::list_paths;
///
/// let docs = parse_yaml_documents("jobs:\n- name: test\n  plan: [lint]\n").unwrap();
/// let paths: Vec<String> = list_paths(&docs[0]).iter().map(|p| p.to_string()).collect();
/// assert_eq!(paths, vec!["/jobs/name=test/name", "/jobs/name=test/plan/0"]);
/// ```
pub fn list_paths(root: &Value) -> Vec<Path> {
    Evaluator::new(root).leaf_paths(0, DEFAULT_IDENTIFIERS)
}
