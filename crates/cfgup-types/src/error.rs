use thiserror::Error;

/// Errors produced when parsing a dotted version string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("version string is empty")]
    Empty,

    #[error("invalid version component {component:?} in {input:?}")]
    InvalidComponent { input: String, component: String },

    #[error("too many version components in {input:?}: expected at most 4, got {count}")]
    TooManyComponents { input: String, count: usize },
}
