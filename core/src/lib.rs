//! Core types for layered command-line configuration.
//!
//! This crate defines the foundational pieces shared by the loader and the
//! resolver:
//!
//! - [`ArgumentSpec`]: one declared positional or option, with its
//!   destination key, owner and (for options) default value.
//! - [`ParserNode`]: an ordered set of specs plus, at the top level, one
//!   [`SubcommandNode`] per subcommand.
//! - [`Subcommand`], [`MainCommand`], [`PluginModule`]: the contribution
//!   contract plugins implement, as explicit capability records.
//!
//! Validation ([`validate_surface`]) catches structural errors such as
//! duplicate subcommands and malformed flag spellings. Presence checks
//! ([`require_keys`]) back the per-subcommand required-field validation.
//!
//! Merging ([`merge_sections`]) folds config-file sections into one flat
//! [`ConfigMap`], later sections winning.
//!
//! # Example
//!
//! ```
//! use argconfig_core::*;
//!
//! let main = MainCommand::new("tool")
//!     .with_positional_args(|sink| {
//!         sink.add(ArgumentSpec::positional("input"));
//!     })
//!     .with_global_options(|sink| {
//!         sink.add(ArgumentSpec::option("--verbose").with_short('v'));
//!     });
//!
//! let mut node = ParserNode::new();
//! main.contribute_positional_args(&mut ArgSink::new(&mut node, Owner::Main));
//! assert_eq!(node.positionals().count(), 1);
//! assert!(validate_surface(&node).is_empty());
//! ```

mod contract;
mod merge;
mod types;
mod validate;

pub use contract::{ArgSink, Contributor, MainCommand, PluginModule, RequiredCheck, Subcommand};
pub use merge::{merge_sections, overlay};
pub use types::*;
pub use validate::{MissingField, ValidationError, is_truthy, require_keys, validate_surface};
