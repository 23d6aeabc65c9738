//! Error types for plan construction.

use cfgup_tree::TreeError;
use cfgup_types::VersionError;

/// Errors that can occur while building an upgrade plan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// A template entry is not a scalar, a sub-template, or a list of
    /// sub-templates, or its key is not a usable element name.
    #[error("malformed template at {key}: {reason}")]
    MalformedTemplate { key: String, reason: String },

    /// A rename source or removal entry is not a valid absolute path.
    #[error("path error: {0}")]
    Path(#[from] TreeError),

    /// The target version could not be parsed.
    #[error("version error: {0}")]
    Version(#[from] VersionError),

    /// No target version was set on the plan.
    #[error("upgrade plan has no target version")]
    MissingVersion,
}

impl PlanError {
    /// Create a malformed-template error for the entry at `key`.
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTemplate {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for plan results.
pub type PlanResult<T> = Result<T, PlanError>;
