//! Error types for the upgrade engine.

use cfgup_plan::PlanError;
use cfgup_tree::TreeError;
use cfgup_types::Version;

/// Errors that abort an upgrade run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpgradeError {
    /// An add or move needs to descend into an existing leaf.
    #[error("structural conflict at {path}: existing leaf cannot hold child elements")]
    StructuralConflict { path: String },

    /// A template value has a shape the merger cannot apply.
    #[error("malformed template at {key}: {reason}")]
    MalformedTemplate { key: String, reason: String },

    /// A rename source or removal path did not resolve (strict mode only).
    #[error("path not found: {path}")]
    PathNotFound { path: String },

    /// A path expression could not be parsed.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// Two plans in a chain target the same version.
    #[error("an upgrade plan targeting version {version} is already registered")]
    DuplicateTarget { version: Version },

    /// Plan construction failed.
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),
}

impl From<TreeError> for UpgradeError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::StructuralConflict { path } => Self::StructuralConflict { path },
            TreeError::InvalidPath { path, reason } => Self::InvalidPath { path, reason },
        }
    }
}

/// Convenience alias for engine results.
pub type UpgradeResult<T> = Result<T, UpgradeError>;
