//! Error types for tree operations.

use thiserror::Error;

/// Errors that can occur while addressing or reshaping a document tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A path expression is not a valid absolute element path.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A path segment names a leaf where a container was required.
    #[error("structural conflict at {path}: existing leaf cannot hold child elements")]
    StructuralConflict { path: String },
}

/// Convenience type alias for tree operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;
