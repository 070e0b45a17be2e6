use super::ast::{Path, PathSegment};
use super::error::GrabError;
use crate::document::node::{Kind, Mapping, Scalar, Value};
use crate::document::normalize::{is_complex_list, normalize};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Fields tried, in order, when a complex list entry has to be named.
pub const DEFAULT_IDENTIFIERS: &[&str] = &["name", "key", "id"];

/// A borrowed position inside a tree.
///
/// Entries of a [`Value::Records`] list are plain mappings rather than
/// values, so the walker tracks them separately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Value(&'a Value),
    Record(&'a Mapping),
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> Kind {
        match self {
            Node::Value(value) => value.kind(),
            Node::Record(_) => Kind::Mapping,
        }
    }

    pub fn is_mapping(&self) -> bool {
        self.kind() == Kind::Mapping
    }

    /// Looks up `key` if this node is mapping-shaped.
    pub fn get(&self, key: &str) -> Option<Node<'a>> {
        match *self {
            Node::Value(value) => value.get(key).map(Node::Value),
            Node::Record(map) => map.get(key).map(Node::Value),
        }
    }

    pub fn keys(&self) -> Vec<&'a str> {
        match *self {
            Node::Value(value) => value.keys(),
            Node::Record(map) => map.keys().map(String::as_str).collect(),
        }
    }

    pub fn as_scalar(&self) -> Option<&'a Scalar> {
        match *self {
            Node::Value(value) => value.as_scalar(),
            Node::Record(_) => None,
        }
    }

    /// Returns the entries of this node if it classifies as a complex list.
    pub fn records(&self) -> Option<Vec<Node<'a>>> {
        match *self {
            Node::Value(Value::Records(records)) => Some(records.iter().map(Node::Record).collect()),
            Node::Value(Value::Sequence(items)) if is_complex_list(items) => {
                Some(items.iter().map(Node::Value).collect())
            }
            _ => None,
        }
    }

    /// Returns the list element at `idx`, or `None` if out of range or not a list.
    fn element(&self, idx: usize) -> Option<Node<'a>> {
        match *self {
            Node::Value(Value::Sequence(items)) => items.get(idx).map(Node::Value),
            Node::Value(Value::Records(records)) => records.get(idx).map(Node::Record),
            _ => None,
        }
    }

    fn len(&self) -> usize {
        match *self {
            Node::Value(Value::Sequence(items)) => items.len(),
            Node::Value(Value::Records(records)) => records.len(),
            _ => 0,
        }
    }

    /// Returns the normalized, owned value at this position.
    pub fn to_value(&self) -> Value {
        match *self {
            Node::Value(value) => normalize(value),
            Node::Record(map) => normalize(&Value::Mapping(map.clone())),
        }
    }

    /// Returns true if the identifier `field` of this entry renders as `value`.
    ///
    /// Entries without the field never match.
    fn identified_by(&self, field: &str, value: &str) -> bool {
        self.get(field)
            .and_then(|node| node.as_scalar())
            .is_some_and(|scalar| scalar.matches_text(value))
    }
}

/// Walks a tree along structured paths.
pub struct Evaluator<'a> {
    root: &'a Value,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a Value) -> Self {
        Evaluator { root }
    }

    /// Returns the normalized value at `path`.
    ///
    /// Only the located sub-tree is normalized; siblings along the way are
    /// never converted.
    pub fn grab(&self, path: &Path) -> Result<Value, GrabError> {
        self.locate(path).map(|node| node.to_value())
    }

    /// Returns a borrowed position for `path` without normalizing anything.
    ///
    /// The first failing segment aborts the walk; the error carries the path
    /// resolved up to that segment.
    pub fn locate(&self, path: &Path) -> Result<Node<'a>, GrabError> {
        debug!(path = %path, "grabbing value");

        let mut pointer = Node::Value(self.root);
        let mut resolved = Path::root(path.document_idx);

        for segment in &path.segments {
            pointer = step(pointer, segment, &resolved)?;
            resolved.push(segment.clone());
            trace!(resolved = %resolved, kind = %pointer.kind(), "resolved segment");
        }

        Ok(pointer)
    }

    /// Lists the path of every leaf below the root.
    ///
    /// Entries of complex lists are addressed by the first of `identifiers`
    /// that names every entry uniquely, by index otherwise. Empty mappings
    /// and lists count as leaves.
    pub fn leaf_paths(&self, document_idx: usize, identifiers: &[&str]) -> Vec<Path> {
        let mut paths = Vec::new();
        collect_leaves(
            Node::Value(self.root),
            Path::root(document_idx),
            identifiers,
            &mut paths,
        );
        paths
    }
}

/// Returns the normalized value at `path` in `root`.
///
/// # Example
///
/// ```
/// use yamlgrab::document::parser::parse_yaml_documents;
/// use yamlgrab::yamlpath::{grab, Path, PathSegment};
/// use yamlgrab::Value;
///
/// let docs = parse_yaml_documents("items:\n- name: x\n  v: 1\n- name: y\n  v: 2\n").unwrap();
/// let path = Path::new(vec![
///     PathSegment::key("items"),
///     PathSegment::record("name", "y"),
///     PathSegment::key("v"),
/// ]);
/// assert_eq!(grab(&docs[0], &path).unwrap(), Value::from(2));
/// ```
pub fn grab(root: &Value, path: &Path) -> Result<Value, GrabError> {
    Evaluator::new(root).grab(path)
}

/// Borrowing variant of [`grab`].
pub fn grab_ref<'a>(root: &'a Value, path: &Path) -> Result<Node<'a>, GrabError> {
    Evaluator::new(root).locate(path)
}

/// Returns the first identifier field present as a scalar in every entry,
/// with no value repeated.
pub(crate) fn identifier_field<'i>(entries: &[Node<'_>], identifiers: &[&'i str]) -> Option<&'i str> {
    identifiers.iter().copied().find(|field| {
        let mut seen = HashSet::with_capacity(entries.len());
        entries
            .iter()
            .all(|entry| match entry.get(field).and_then(|node| node.as_scalar()) {
                Some(Scalar::Null) | None => false,
                Some(scalar) => seen.insert(scalar.to_string()),
            })
    })
}

/// Applies a single segment to `pointer`; `resolved` is the path leading to it.
pub(crate) fn step<'a>(
    pointer: Node<'a>,
    segment: &PathSegment,
    resolved: &Path,
) -> Result<Node<'a>, GrabError> {
    match segment {
        PathSegment::MapKey(name) => map_entry(pointer, name, resolved),
        PathSegment::RecordByField { field, value } => record_entry(pointer, field, value, resolved),
        PathSegment::IndexAt(idx) => list_entry(pointer, *idx, resolved),
    }
}

fn map_entry<'a>(pointer: Node<'a>, name: &str, resolved: &Path) -> Result<Node<'a>, GrabError> {
    if !pointer.is_mapping() {
        return Err(GrabError::TypeMismatch {
            expected: Kind::Mapping,
            found: pointer.kind(),
            path: resolved.clone(),
        });
    }

    pointer.get(name).ok_or_else(|| GrabError::KeyNotFound {
        key: name.to_string(),
        available: pointer.keys().into_iter().map(str::to_string).collect(),
        path: resolved.clone(),
    })
}

fn record_entry<'a>(
    pointer: Node<'a>,
    field: &str,
    value: &str,
    resolved: &Path,
) -> Result<Node<'a>, GrabError> {
    if field.is_empty() {
        return Err(GrabError::InvalidSegment {
            segment: format!("{}={}", field, value),
            path: resolved.clone(),
        });
    }

    let records = pointer.records().ok_or_else(|| GrabError::TypeMismatch {
        expected: Kind::ComplexList,
        found: pointer.kind(),
        path: resolved.clone(),
    })?;

    let mut matches = records
        .into_iter()
        .filter(|record| record.identified_by(field, value));

    match (matches.next(), matches.count()) {
        (Some(record), 0) => Ok(record),
        (Some(_), others) => Err(GrabError::RecordAmbiguous {
            field: field.to_string(),
            value: value.to_string(),
            count: others + 1,
            path: resolved.clone(),
        }),
        (None, _) => Err(GrabError::RecordNotFound {
            field: field.to_string(),
            value: value.to_string(),
            path: resolved.clone(),
        }),
    }
}

fn list_entry<'a>(pointer: Node<'a>, idx: isize, resolved: &Path) -> Result<Node<'a>, GrabError> {
    if !pointer.kind().is_list() {
        return Err(GrabError::TypeMismatch {
            expected: Kind::SimpleList,
            found: pointer.kind(),
            path: resolved.clone(),
        });
    }

    usize::try_from(idx)
        .ok()
        .and_then(|idx| pointer.element(idx))
        .ok_or_else(|| GrabError::IndexOutOfRange {
            index: idx,
            len: pointer.len(),
            path: resolved.clone(),
        })
}

fn collect_leaves(node: Node<'_>, path: Path, identifiers: &[&str], paths: &mut Vec<Path>) {
    if node.is_mapping() {
        let keys = node.keys();
        if keys.is_empty() {
            paths.push(path);
            return;
        }
        for key in keys {
            if let Some(child) = node.get(key) {
                let mut child_path = path.clone();
                child_path.push(PathSegment::key(key));
                collect_leaves(child, child_path, identifiers, paths);
            }
        }
        return;
    }

    if !node.kind().is_list() || node.len() == 0 {
        paths.push(path);
        return;
    }

    let named = node
        .records()
        .and_then(|records| identifier_field(&records, identifiers).map(|field| (field, records)));

    match named {
        Some((field, records)) => {
            for record in records {
                let name = record
                    .get(field)
                    .and_then(|node| node.as_scalar())
                    .map(Scalar::to_string)
                    .unwrap_or_default();
                let mut child_path = path.clone();
                child_path.push(PathSegment::record(field, name));
                collect_leaves(record, child_path, identifiers, paths);
            }
        }
        None => {
            for idx in 0..node.len() {
                if let Some(child) = node.element(idx) {
                    let mut child_path = path.clone();
                    child_path.push(PathSegment::index(idx as isize));
                    collect_leaves(child, child_path, identifiers, paths);
                }
            }
        }
    }
}
