//! Absolute element paths.
//!
//! A path names a node by the chain of element names leading to it from the
//! document root, e.g. `/ExampleStructure/DeepSettingOne`.
//!
//! Valid paths:
//! - Must start with exactly one `/`
//! - Must name at least one element
//! - Must not contain empty segments (`//`) or a trailing `/`
//! - Must not contain whitespace or wildcard characters (`*`, `?`, `[`, `]`)

use std::fmt;
use std::str::FromStr;

use crate::error::{TreeError, TreeResult};

/// Characters that are forbidden anywhere in a path segment.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '*', '?', '[', ']'];

/// A parsed absolute element path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// Parse an absolute path expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgup_tree::NodePath;
    ///
    /// let path = NodePath::parse("/ExampleStructure/DeepSettingOne").unwrap();
    /// assert_eq!(path.depth(), 2);
    /// assert!(NodePath::parse("ExampleString").is_err());
    /// assert!(NodePath::parse("/a//b").is_err());
    /// ```
    pub fn parse(input: &str) -> TreeResult<Self> {
        let invalid = |reason: &str| TreeError::InvalidPath {
            path: input.to_string(),
            reason: reason.to_string(),
        };

        let Some(rest) = input.strip_prefix('/') else {
            return Err(invalid("path must start with '/'"));
        };
        if rest.is_empty() {
            return Err(invalid("path must name at least one element"));
        }

        let mut segments = Vec::new();
        for segment in rest.split('/') {
            if segment.is_empty() {
                return Err(invalid("path segments must not be empty"));
            }
            if let Some(ch) = segment.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
                return Err(TreeError::InvalidPath {
                    path: input.to_string(),
                    reason: format!("contains forbidden character: {ch:?}"),
                });
            }
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    /// Build a path from already-split element names.
    pub fn from_segments<I, S>(segments: I) -> TreeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        Self::parse(&format!("/{}", segments.join("/")))
    }

    /// The element names from the root downwards.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of levels below the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Name of the addressed element (the last segment).
    pub fn leaf_name(&self) -> &str {
        // A parsed path always has at least one segment.
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Segments of the parent container (everything but the last segment).
    pub fn parent_segments(&self) -> &[String] {
        &self.segments[..self.segments.len().saturating_sub(1)]
    }

    /// A new path with `name` appended.
    pub fn join(&self, name: &str) -> TreeResult<Self> {
        Self::from_segments(self.segments.iter().map(String::as_str).chain([name]))
    }

    /// Returns `true` if `prefix` addresses this node or one of its ancestors.
    pub fn starts_with(&self, prefix: &NodePath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Replace the leading `from` segments with `to`.
    ///
    /// Returns `None` if this path does not start with `from`.
    pub fn rebase(&self, from: &NodePath, to: &NodePath) -> Option<NodePath> {
        if !self.starts_with(from) {
            return None;
        }
        let mut segments = to.segments.clone();
        segments.extend_from_slice(&self.segments[from.depth()..]);
        Some(Self { segments })
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Render a segment chain as an absolute path string, for diagnostics.
pub fn display_segments(segments: &[String]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }
    segments.iter().fold(String::new(), |mut acc, s| {
        acc.push('/');
        acc.push_str(s);
        acc
    })
}
