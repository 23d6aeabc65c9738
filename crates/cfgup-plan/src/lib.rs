//! Upgrade plans for cfgup.
//!
//! An [`UpgradePlan`] describes one schema transition: elements to add,
//! elements to rename or move, elements to remove, and the version the
//! upgraded document is stamped with. Plans are assembled with the fluent
//! [`UpgradePlanBuilder`] and validated once, at [`build`](UpgradePlanBuilder::build)
//! time; the engine only ever sees well-formed plans.
//!
//! # Key Types
//!
//! - [`Template`] / [`TemplateValue`] — Ordered nested structure of scalars,
//!   sub-templates, and lists of sub-templates
//! - [`RenameRule`] — One flattened `destination <- source` move
//! - [`UpgradePlan`] / [`UpgradePlanBuilder`] — The validated plan and its builder

pub mod error;
pub mod plan;
pub mod template;

pub use error::{PlanError, PlanResult};
pub use plan::{RenameRule, UpgradePlan, UpgradePlanBuilder};
pub use template::{Template, TemplateValue};
