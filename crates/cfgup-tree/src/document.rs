use serde::{Deserialize, Serialize};

use cfgup_types::Version;

use crate::node::Node;

/// A configuration document: a node tree plus its schema version.
///
/// The version is tracked next to the tree rather than as an attribute of
/// the root element. A document without a version tag is treated as
/// [`Version::initial`] by the upgrade engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Root element of the tree.
    pub root: Node,
    /// Schema version tag, if the source carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
}

impl Document {
    /// Create an untagged document around `root`.
    pub fn new(root: Node) -> Self {
        Self {
            root,
            version: None,
        }
    }

    /// Create a document tagged with `version`.
    pub fn with_version(root: Node, version: Version) -> Self {
        Self {
            root,
            version: Some(version),
        }
    }

    /// The tagged version, or `default` when the document carries none.
    pub fn version_or(&self, default: Version) -> Version {
        self.version.unwrap_or(default)
    }

    /// The tagged version, or `1.0` when the document carries none.
    pub fn current_version(&self) -> Version {
        self.version_or(Version::initial())
    }
}
