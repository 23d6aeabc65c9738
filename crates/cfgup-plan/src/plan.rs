use cfgup_tree::NodePath;
use cfgup_types::{Version, VersionError};

use crate::error::{PlanError, PlanResult};
use crate::template::{Template, TemplateValue};

// ---------------------------------------------------------------------------
// RenameRule
// ---------------------------------------------------------------------------

/// One move taken from a rename map: the node found at `source` in the
/// pre-upgrade tree ends up at `destination`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameRule {
    /// Where the node ends up. The last segment is its new name.
    pub destination: NodePath,
    /// Where the node is read from.
    pub source: NodePath,
}

impl RenameRule {
    pub fn new(destination: NodePath, source: NodePath) -> Self {
        Self {
            destination,
            source,
        }
    }
}

/// Flatten a rename map into rules, depth first in template order.
///
/// The key path to each scalar leaf is the destination and the scalar itself
/// is the source path.
fn flatten_renames(map: &Template, prefix: &[String], rules: &mut Vec<RenameRule>) -> PlanResult<()> {
    for (key, value) in map.entries() {
        let mut destination = prefix.to_vec();
        destination.push(key.to_string());
        let location = format!("/{}", destination.join("/"));

        match value {
            TemplateValue::Scalar(source) => {
                let source = NodePath::parse(source)?;
                let destination = NodePath::from_segments(destination)
                    .map_err(|e| PlanError::malformed(&location, e.to_string()))?;
                rules.push(RenameRule::new(destination, source));
            }
            TemplateValue::Object(inner) => flatten_renames(inner, &destination, rules)?,
            TemplateValue::List(_) => {
                return Err(PlanError::malformed(
                    location,
                    "rename maps accept only source paths and nested maps",
                ))
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// UpgradePlan
// ---------------------------------------------------------------------------

/// A validated, read-only description of one version transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpgradePlan {
    additions: Template,
    renames: Vec<RenameRule>,
    removals: Vec<NodePath>,
    target_version: Version,
}

impl UpgradePlan {
    /// Start building a plan.
    pub fn builder() -> UpgradePlanBuilder {
        UpgradePlanBuilder::default()
    }

    /// Elements to merge into the tree root.
    pub fn additions(&self) -> &Template {
        &self.additions
    }

    /// Moves, in rename-map order.
    pub fn renames(&self) -> &[RenameRule] {
        &self.renames
    }

    /// Paths to delete, in the order they were supplied.
    pub fn removals(&self) -> &[NodePath] {
        &self.removals
    }

    /// Version the upgraded document is stamped with.
    pub fn target_version(&self) -> Version {
        self.target_version
    }
}

// ---------------------------------------------------------------------------
// UpgradePlanBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`UpgradePlan`].
///
/// Setters never fail; everything is checked in [`build`](Self::build).
///
/// ```
/// use cfgup_plan::{Template, UpgradePlan};
///
/// let plan = UpgradePlan::builder()
///     .add_elements(Template::new().with("AddedNumber", "3"))
///     .rename_elements(Template::new().with("ExampleStringRenamed", "/ExampleString"))
///     .remove_elements(["/Obsolete"])
///     .set_version_str("2.0")
///     .build()
///     .unwrap();
/// assert_eq!(plan.target_version().to_string(), "2.0");
/// assert_eq!(plan.renames().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct UpgradePlanBuilder {
    additions: Template,
    renames: Template,
    removals: Vec<String>,
    version: Option<Result<Version, VersionError>>,
}

impl UpgradePlanBuilder {
    /// Set the additions template, replacing any previous one.
    pub fn add_elements(mut self, additions: Template) -> Self {
        self.additions = additions;
        self
    }

    /// Set the rename map, replacing any previous one.
    pub fn rename_elements(mut self, renames: Template) -> Self {
        self.renames = renames;
        self
    }

    /// Append paths to the removal list.
    pub fn remove_elements<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.removals.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Set the target version.
    pub fn set_version(mut self, version: Version) -> Self {
        self.version = Some(Ok(version));
        self
    }

    /// Set the target version from a dotted string. A parse failure is
    /// reported by [`build`](Self::build).
    pub fn set_version_str(mut self, version: &str) -> Self {
        self.version = Some(Version::parse(version));
        self
    }

    /// Validate everything and produce the plan.
    pub fn build(self) -> PlanResult<UpgradePlan> {
        let target_version = self.version.ok_or(PlanError::MissingVersion)??;

        self.additions.validate()?;

        self.renames.validate()?;
        let mut renames = Vec::new();
        flatten_renames(&self.renames, &[], &mut renames)?;

        let removals = self
            .removals
            .iter()
            .map(|p| NodePath::parse(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UpgradePlan {
            additions: self.additions,
            renames,
            removals,
            target_version,
        })
    }
}
