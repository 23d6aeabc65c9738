use std::collections::BTreeMap;
use std::ops::Bound;

use cfgup_plan::UpgradePlan;
use cfgup_tree::Document;
use cfgup_types::Version;
use tracing::{debug, info};

use crate::config::UpgradeConfig;
use crate::error::{UpgradeError, UpgradeResult};
use crate::upgrader::{UpgradeReport, Upgrader};

/// An ordered set of upgrade plans, one per target version.
///
/// Upgrading a document applies, in ascending version order, every plan whose
/// target is newer than the document's current version and not newer than
/// the requested target. A document that is already at or past the target
/// is returned unchanged; plans never downgrade.
#[derive(Clone, Debug, Default)]
pub struct UpgradeChain {
    plans: BTreeMap<Version, UpgradePlan>,
    config: UpgradeConfig,
}

impl UpgradeChain {
    /// Create an empty chain with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty chain with an explicit configuration.
    pub fn with_config(config: UpgradeConfig) -> Self {
        Self {
            plans: BTreeMap::new(),
            config,
        }
    }

    /// Register a plan. Fails if a plan for the same target version exists.
    pub fn add_plan(&mut self, plan: UpgradePlan) -> UpgradeResult<()> {
        let version = plan.target_version();
        if self.plans.contains_key(&version) {
            return Err(UpgradeError::DuplicateTarget { version });
        }
        debug!(%version, "registered upgrade plan");
        self.plans.insert(version, plan);
        Ok(())
    }

    /// Register a plan, builder style.
    pub fn with_plan(mut self, plan: UpgradePlan) -> UpgradeResult<Self> {
        self.add_plan(plan)?;
        Ok(self)
    }

    /// Number of registered plans.
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// The newest version any registered plan upgrades to.
    pub fn latest_version(&self) -> Option<Version> {
        self.plans.keys().next_back().copied()
    }

    /// The plans that would run to take a document at `from` to `to`.
    pub fn pending(&self, from: Version, to: Version) -> Vec<&UpgradePlan> {
        if to <= from {
            return Vec::new();
        }
        self.plans
            .range((Bound::Excluded(from), Bound::Included(to)))
            .map(|(_, plan)| plan)
            .collect()
    }

    /// Upgrade `document` up to and including `target`.
    pub fn upgrade_to(&self, document: &Document, target: Version) -> UpgradeResult<Document> {
        self.run_to(document, target).map(|(document, _)| document)
    }

    /// Upgrade `document` through every registered plan that is newer.
    pub fn upgrade_latest(&self, document: &Document) -> UpgradeResult<Document> {
        match self.latest_version() {
            Some(latest) => self.upgrade_to(document, latest),
            None => Ok(document.clone()),
        }
    }

    /// Upgrade `document` up to `target`, returning one report per step.
    pub fn run_to(
        &self,
        document: &Document,
        target: Version,
    ) -> UpgradeResult<(Document, Vec<UpgradeReport>)> {
        let from = document.version_or(self.config.default_version);
        let steps = self.pending(from, target);
        if steps.is_empty() {
            debug!(%from, %target, "document already up to date");
            return Ok((document.clone(), Vec::new()));
        }

        let mut current = document.clone();
        let mut reports = Vec::with_capacity(steps.len());
        for plan in steps {
            let (next, report) = Upgrader::with_config(plan, self.config.clone()).run(&current)?;
            current = next;
            reports.push(report);
        }

        info!(%from, %target, steps = reports.len(), "upgrade chain complete");
        Ok((current, reports))
    }
}
