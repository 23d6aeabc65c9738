//! Foundation types for cfgup.
//!
//! Every other cfgup crate depends on `cfgup-types` for the schema version
//! stamped on configuration documents and upgrade plans.
//!
//! # Key Types
//!
//! - [`Version`] — Four-component dotted version (`major.minor.build.revision`)
//! - [`VersionError`] — Parse failures for dotted version strings

pub mod error;
pub mod version;

pub use error::VersionError;
pub use version::Version;
