use cfgup_plan::{RenameRule, UpgradePlan};
use cfgup_tree::{Document, NodePath};
use cfgup_types::Version;
use tracing::{debug, info};

use crate::config::UpgradeConfig;
use crate::error::UpgradeResult;
use crate::merge::merge_template;
use crate::mover::{apply_removals, apply_renames};

// ---------------------------------------------------------------------------
// UpgradeReport
// ---------------------------------------------------------------------------

/// What a single upgrade run did to the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpgradeReport {
    /// Version the input document was at (tagged or defaulted).
    pub from: Version,
    /// Version the output document is stamped with.
    pub to: Version,
    /// Rename rules that were applied.
    pub renamed: Vec<RenameRule>,
    /// Rename rules whose source did not resolve.
    pub skipped_renames: Vec<RenameRule>,
    /// Removal paths that were detached.
    pub removed: Vec<NodePath>,
    /// Removal paths that did not resolve.
    pub skipped_removals: Vec<NodePath>,
    /// Number of nodes created by the additions merge.
    pub nodes_added: usize,
}

impl UpgradeReport {
    /// Returns `true` if the run changed nothing but the version.
    pub fn is_empty(&self) -> bool {
        self.renamed.is_empty() && self.removed.is_empty() && self.nodes_added == 0
    }

    /// Number of plan entries that were skipped.
    pub fn skipped(&self) -> usize {
        self.skipped_renames.len() + self.skipped_removals.len()
    }
}

// ---------------------------------------------------------------------------
// Upgrader
// ---------------------------------------------------------------------------

/// Applies one [`UpgradePlan`] to documents.
///
/// An upgrader holds no state between runs; the same instance may upgrade
/// any number of documents.
#[derive(Clone, Debug)]
pub struct Upgrader<'a> {
    plan: &'a UpgradePlan,
    config: UpgradeConfig,
}

impl<'a> Upgrader<'a> {
    /// Create an upgrader with the default configuration.
    pub fn new(plan: &'a UpgradePlan) -> Self {
        Self::with_config(plan, UpgradeConfig::default())
    }

    /// Create an upgrader with an explicit configuration.
    pub fn with_config(plan: &'a UpgradePlan, config: UpgradeConfig) -> Self {
        Self { plan, config }
    }

    /// The plan being applied.
    pub fn plan(&self) -> &UpgradePlan {
        self.plan
    }

    /// The current configuration.
    pub fn config(&self) -> &UpgradeConfig {
        &self.config
    }

    /// Upgrade `document`, returning the new document.
    pub fn upgrade(&self, document: &Document) -> UpgradeResult<Document> {
        self.run(document).map(|(document, _)| document)
    }

    /// Upgrade `document`, returning the new document and a report.
    ///
    /// Phases run in a fixed order: renames, then removals, then additions.
    /// `document` is only read; on error the partial copy is dropped.
    pub fn run(&self, document: &Document) -> UpgradeResult<(Document, UpgradeReport)> {
        let from = document.version_or(self.config.default_version);
        let to = self.plan.target_version();
        debug!(%from, %to, "starting upgrade");

        let original = &document.root;
        let mut tree = original.clone();

        let renames = apply_renames(original, &mut tree, self.plan.renames(), self.config.strict_paths)?;
        let removals = apply_removals(&mut tree, self.plan.removals(), self.config.strict_paths)?;
        let nodes_added = merge_template(self.plan.additions(), &mut tree)?;

        let report = UpgradeReport {
            from,
            to,
            renamed: renames.applied,
            skipped_renames: renames.skipped,
            removed: removals.applied,
            skipped_removals: removals.skipped,
            nodes_added,
        };

        info!(
            %from,
            %to,
            renamed = report.renamed.len(),
            removed = report.removed.len(),
            added = report.nodes_added,
            skipped = report.skipped(),
            "upgrade complete"
        );

        Ok((Document::with_version(tree, to), report))
    }
}

/// Apply `plan` to `document` with the default configuration.
pub fn upgrade(plan: &UpgradePlan, document: &Document) -> UpgradeResult<Document> {
    Upgrader::new(plan).upgrade(document)
}
