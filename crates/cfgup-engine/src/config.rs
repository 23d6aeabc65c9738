use serde::{Deserialize, Serialize};

use cfgup_types::Version;

/// Settings for an upgrade run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeConfig {
    /// Version assumed for documents that carry no version tag.
    pub default_version: Version,
    /// When `true`, a rename source or removal path that does not resolve
    /// aborts the run with [`PathNotFound`](crate::UpgradeError::PathNotFound)
    /// instead of being skipped.
    pub strict_paths: bool,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            default_version: Version::initial(),
            strict_paths: false,
        }
    }
}

impl UpgradeConfig {
    /// A configuration that treats unresolved paths as errors.
    pub fn strict() -> Self {
        Self {
            strict_paths: true,
            ..Default::default()
        }
    }
}
