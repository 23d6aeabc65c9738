//! Upgrade engine for cfgup.
//!
//! Takes a [`Document`](cfgup_tree::Document) and an
//! [`UpgradePlan`](cfgup_plan::UpgradePlan) and produces a new document at
//! the plan's target version. The caller's document is never mutated: the
//! engine works on a copy and hands back a fresh value.
//!
//! A single upgrade runs three phases, always in this order:
//!
//! 1. **Rename/move** — every rename rule whose source exists in the
//!    pre-upgrade tree detaches that node from wherever earlier rules left
//!    it and grafts it at the destination
//! 2. **Remove** — every removal path is detached
//! 3. **Add** — the additions template is merged into the root
//!
//! Paths that do not resolve are skipped unless
//! [`UpgradeConfig::strict_paths`] is set.
//!
//! # Key Types
//!
//! - [`Upgrader`] / [`upgrade`] — Single-step plan application
//! - [`UpgradeReport`] — What a run renamed, removed, skipped, and added
//! - [`UpgradeChain`] — Applies several plans in version order
//! - [`UpgradeConfig`] — Engine settings
//! - [`merge_template`] — The additive tree merge on its own

pub mod chain;
pub mod config;
pub mod error;
pub mod merge;
pub mod mover;
pub mod upgrader;

pub use chain::UpgradeChain;
pub use config::UpgradeConfig;
pub use error::{UpgradeError, UpgradeResult};
pub use merge::merge_template;
pub use mover::{apply_removals, apply_renames, PathOutcome};
pub use upgrader::{upgrade, UpgradeReport, Upgrader};
