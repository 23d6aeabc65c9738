//! Path-based moves and removals.

use cfgup_plan::RenameRule;
use cfgup_tree::{Node, NodePath};
use tracing::debug;

use crate::error::{UpgradeError, UpgradeResult};

/// Outcome of applying a batch of path operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathOutcome<T> {
    /// Entries that resolved and were applied.
    pub applied: Vec<T>,
    /// Entries whose path did not resolve and were skipped.
    pub skipped: Vec<T>,
}

impl<T> Default for PathOutcome<T> {
    fn default() -> Self {
        Self {
            applied: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Where nodes moved by earlier rules currently live in the working tree.
#[derive(Debug, Default)]
struct Relocations {
    /// `(source in the pre-upgrade tree, current location)`.
    moves: Vec<(NodePath, NodePath)>,
}

impl Relocations {
    /// Current location of the node found at `original` before any rule ran.
    ///
    /// The deepest recorded move covering `original` wins.
    fn current(&self, original: &NodePath) -> NodePath {
        self.moves
            .iter()
            .filter(|(from, _)| original.starts_with(from))
            .max_by_key(|(from, _)| from.depth())
            .and_then(|(from, to)| original.rebase(from, to))
            .unwrap_or_else(|| original.clone())
    }

    /// Record that the node originally at `source`, last seen at `from`,
    /// now lives at `to`. Earlier moves nested inside it follow along.
    fn record(&mut self, source: NodePath, from: &NodePath, to: &NodePath) {
        for (_, location) in &mut self.moves {
            if let Some(rebased) = location.rebase(from, to) {
                *location = rebased;
            }
        }
        self.moves.push((source, to.clone()));
    }
}

/// Apply rename rules to `working`.
///
/// A rule applies when its source exists in `original`, the pre-upgrade
/// tree. The node is then detached from wherever earlier rules left it in
/// `working`, so anything already grafted into it travels along, and it is
/// appended under the destination's parent (created on demand) carrying the
/// destination's last segment as its name. Every node is moved, never
/// copied.
pub fn apply_renames(
    original: &Node,
    working: &mut Node,
    rules: &[RenameRule],
    strict: bool,
) -> UpgradeResult<PathOutcome<RenameRule>> {
    let mut outcome = PathOutcome::default();
    let mut relocations = Relocations::default();

    for rule in rules {
        let current = relocations.current(&rule.source);
        let detached = match original.resolve(&rule.source) {
            Some(_) => working.detach(&current),
            None => None,
        };
        let Some(node) = detached else {
            if strict {
                return Err(UpgradeError::PathNotFound {
                    path: rule.source.to_string(),
                });
            }
            debug!(source = %rule.source, destination = %rule.destination, "rename source not found; skipping");
            outcome.skipped.push(rule.clone());
            continue;
        };

        let parent_segments = rule.destination.parent_segments();
        working
            .ensure_containers(parent_segments)?
            .push_child(node.renamed(rule.destination.leaf_name()), parent_segments)?;
        relocations.record(rule.source.clone(), &current, &rule.destination);

        debug!(source = %rule.source, from = %current, destination = %rule.destination, "element moved");
        outcome.applied.push(rule.clone());
    }

    Ok(outcome)
}

/// Detach every node addressed by `paths` from `working`.
///
/// Removing a path that no longer resolves is a no-op, so removing the same
/// path twice succeeds.
pub fn apply_removals(
    working: &mut Node,
    paths: &[NodePath],
    strict: bool,
) -> UpgradeResult<PathOutcome<NodePath>> {
    let mut outcome = PathOutcome::default();

    for path in paths {
        match working.detach(path) {
            Some(_) => {
                debug!(%path, "element removed");
                outcome.applied.push(path.clone());
            }
            None if strict => {
                return Err(UpgradeError::PathNotFound {
                    path: path.to_string(),
                })
            }
            None => {
                debug!(%path, "removal path not found; skipping");
                outcome.skipped.push(path.clone());
            }
        }
    }

    Ok(outcome)
}
