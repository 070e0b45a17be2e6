//! Structured paths into a document tree.

use std::fmt;

/// One traversal step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Value stored under `name` in a mapping
    MapKey(String),
    /// Entry of a complex list whose `field` equals `value`
    RecordByField { field: String, value: String },
    /// Zero-based element of a list
    IndexAt(isize),
}

impl PathSegment {
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::MapKey(name.into())
    }

    pub fn record(field: impl Into<String>, value: impl Into<String>) -> Self {
        PathSegment::RecordByField {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn index(idx: isize) -> Self {
        PathSegment::IndexAt(idx)
    }

    fn go_patch(&self) -> String {
        match self {
            PathSegment::MapKey(name) => name.clone(),
            PathSegment::RecordByField { field, value } => format!("{}={}", field, value),
            PathSegment::IndexAt(idx) => idx.to_string(),
        }
    }

    fn dot(&self) -> String {
        match self {
            PathSegment::MapKey(name) => name.clone(),
            PathSegment::RecordByField { value, .. } => value.clone(),
            PathSegment::IndexAt(idx) => idx.to_string(),
        }
    }
}

/// A complete path: the document it is rooted in plus its segments.
///
/// # Example
///
/// ```
/// use yamlgrab::yamlpath::{Path, PathSegment};
///
/// let path = Path::new(vec![
///     PathSegment::key("items"),
///     PathSegment::record("name", "web"),
///     PathSegment::index(0),
/// ]);
/// assert_eq!(path.to_go_patch_style(), "/items/name=web/0");
/// assert_eq!(path.to_dot_style(), "items.web.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    /// Index of the document within a multi-document stream.
    pub document_idx: usize,
    /// Segments applied left to right.
    pub segments: Vec<PathSegment>,
}

impl Path {
    /// Creates a path into the first document.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self {
            document_idx: 0,
            segments,
        }
    }

    /// Creates an empty path rooted in the given document.
    pub fn root(document_idx: usize) -> Self {
        Self {
            document_idx,
            segments: Vec::new(),
        }
    }

    pub fn with_document(mut self, document_idx: usize) -> Self {
        self.document_idx = document_idx;
        self
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Renders the path as `/a/name=x/0`. The root renders as `/`.
    ///
    /// Paths into any document but the first carry a `#N` prefix.
    pub fn to_go_patch_style(&self) -> String {
        let body = if self.segments.is_empty() {
            "/".to_string()
        } else {
            self.segments
                .iter()
                .map(|segment| format!("/{}", segment.go_patch()))
                .collect()
        };
        format!("{}{}", self.document_prefix(), body)
    }

    /// Renders the path as `a.x.0`. The root renders as `(root level)`.
    pub fn to_dot_style(&self) -> String {
        let body = if self.segments.is_empty() {
            "(root level)".to_string()
        } else {
            self.segments
                .iter()
                .map(PathSegment::dot)
                .collect::<Vec<_>>()
                .join(".")
        };
        format!("{}{}", self.document_prefix(), body)
    }

    fn document_prefix(&self) -> String {
        if self.document_idx > 0 {
            format!("#{}", self.document_idx)
        } else {
            String::new()
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_go_patch_style())
    }
}
