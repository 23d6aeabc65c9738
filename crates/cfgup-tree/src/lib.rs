//! Document tree for cfgup.
//!
//! A configuration document is an ordered tree of named nodes. Every node is
//! either a leaf holding a scalar text value or a container holding an
//! ordered list of child nodes; the two are mutually exclusive by
//! construction. The document's schema version lives next to the tree, not
//! inside it.
//!
//! # Modules
//!
//! - [`error`] — Error types for tree and path operations
//! - [`node`] — [`Node`] and [`NodeContent`]
//! - [`path`] — [`NodePath`], absolute `/`-separated element paths
//! - [`document`] — [`Document`], a tree plus its [`Version`](cfgup_types::Version)

pub mod document;
pub mod error;
pub mod node;
pub mod path;

pub use document::Document;
pub use error::{TreeError, TreeResult};
pub use node::{Node, NodeContent};
pub use path::NodePath;
