//! Path string parser.
//!
//! Two textual styles are accepted:
//!
//! - go-patch style, `/spec/containers/name=web/ports/0`, where `/` alone is
//!   the root, `field=value` picks a complex list entry and a number is a list
//!   index;
//! - dot style, `spec.containers.web.ports.0`, where an empty string is the
//!   root. Naming a complex list entry by value needs the tree, see
//!   [`Parser::parse_in`].
//!
//! Either style may start with `#N` to root the path in document `N`.

use super::ast::{Path, PathSegment};
use super::error::PathParseError;
use super::evaluator::{self, identifier_field, Node};
use crate::document::node::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    GoPatch,
    Dot,
}

impl Style {
    fn separator(self) -> char {
        match self {
            Style::GoPatch => '/',
            Style::Dot => '.',
        }
    }
}

/// Parser for path strings.
pub struct Parser<'t> {
    input: String,
    position: usize,
    tree: Option<&'t Value>,
    identifiers: Vec<String>,
}

impl<'t> Parser<'t> {
    /// Parses `query` without looking at any tree.
    ///
    /// Numeric segments always become list indices.
    ///
    /// ```
    /// use yamlgrab::yamlpath::{Parser, PathSegment};
    ///
    /// let path = Parser::parse("#1/items/name=web/0").unwrap();
    /// assert_eq!(path.document_idx, 1);
    /// assert_eq!(path.segments, vec![
    ///     PathSegment::key("items"),
    ///     PathSegment::record("name", "web"),
    ///     PathSegment::index(0),
    /// ]);
    /// ```
    pub fn parse(query: &str) -> Result<Path, PathParseError> {
        let mut parser = Parser::new(query);
        parser.parse_path()
    }

    /// Creates a new parser for the given query string.
    pub fn new(query: &str) -> Self {
        Self {
            input: query.to_string(),
            position: 0,
            tree: None,
            identifiers: evaluator::DEFAULT_IDENTIFIERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Parses `query` against `tree`, the document the path will be applied to.
    ///
    /// Numeric segments that land on a mapping become keys, and dot style
    /// segments that land on a complex list are resolved through the first
    /// of `identifiers` that names every entry.
    pub fn parse_in(query: &str, tree: &'t Value, identifiers: &[&str]) -> Result<Path, PathParseError> {
        let mut parser = Parser::new(query);
        parser.tree = Some(tree);
        parser.identifiers = identifiers.iter().map(|s| s.to_string()).collect();
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<Path, PathParseError> {
        self.skip_whitespace();
        let document_idx = self.parse_document_prefix()?;

        let style = if self.peek() == Some('/') {
            self.next();
            Style::GoPatch
        } else {
            Style::Dot
        };

        let mut path = Path::root(document_idx);
        let mut cursor = self.tree.map(Node::Value);

        if self.is_eof() {
            return Ok(path);
        }

        loop {
            let start = self.position;
            let raw = self.take_until(style.separator());
            if raw.is_empty() {
                return Err(PathParseError::EmptySegment {
                    input: self.input.clone(),
                    position: start,
                });
            }

            let segment = self.classify(&raw, style, cursor)?;
            cursor = cursor.and_then(|node| step(node, &segment, &path));
            path.push(segment);

            if self.is_eof() {
                break;
            }
            self.next();
        }

        Ok(path)
    }

    /// Parses an optional `#N` document prefix.
    fn parse_document_prefix(&mut self) -> Result<usize, PathParseError> {
        if self.peek() != Some('#') {
            return Ok(0);
        }
        self.next();

        let mut digits = String::new();
        while let Some(ch) = self.peek() {
            if ch == '/' || ch == '.' {
                break;
            }
            digits.push(ch);
            self.next();
        }

        digits
            .parse::<usize>()
            .map_err(|_| PathParseError::InvalidDocumentIndex {
                input: self.input.clone(),
                found: digits,
            })
    }

    fn classify(
        &self,
        raw: &str,
        style: Style,
        cursor: Option<Node<'_>>,
    ) -> Result<PathSegment, PathParseError> {
        if style == Style::GoPatch {
            if let Some((field, value)) = raw.split_once('=') {
                return Ok(PathSegment::record(field, value));
            }
        }

        if looks_numeric(raw) {
            if cursor.is_some_and(|node| node.is_mapping()) {
                return Ok(PathSegment::key(raw));
            }
            return raw
                .parse::<isize>()
                .map(PathSegment::index)
                .map_err(|_| PathParseError::InvalidIndex {
                    input: self.input.clone(),
                    found: raw.to_string(),
                });
        }

        if style == Style::Dot {
            if let Some(records) = cursor.and_then(|node| node.records()) {
                let identifiers: Vec<&str> = self.identifiers.iter().map(String::as_str).collect();
                return match identifier_field(&records, &identifiers) {
                    Some(field) => Ok(PathSegment::record(field, raw)),
                    None => Err(PathParseError::Unresolvable {
                        input: self.input.clone(),
                        segment: raw.to_string(),
                        reason: format!(
                            "list entries share no identifier field (tried {})",
                            self.identifiers.join(", ")
                        ),
                    }),
                };
            }
        }

        Ok(PathSegment::key(raw))
    }

    /// Collects characters up to, not including, `separator`.
    fn take_until(&mut self, separator: char) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch == separator {
                break;
            }
            text.push(ch);
            self.next();
        }
        text
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }
}

/// Advances `node` by one segment, or `None` once the tree no longer follows the path.
fn step<'a>(node: Node<'a>, segment: &PathSegment, resolved: &Path) -> Option<Node<'a>> {
    evaluator::step(node, segment, resolved).ok()
}

fn looks_numeric(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit())
}
