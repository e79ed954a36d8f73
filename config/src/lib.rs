//! Layered JSON config files for subcommand-based CLIs.
//!
//! This crate reads the single JSON document that supplies file-level
//! defaults and folds its sections into one flat
//! [`ConfigMap`](argconfig_core::ConfigMap).
//!
//! # Quick start
//!
//! ```no_run
//! use argconfig_config::{ConfigFile, load_config};
//!
//! // One step
//! let config = load_config("config.json", Some("subcommand1")).unwrap();
//!
//! // Or keep the file around to resolve several subcommands
//! let file = ConfigFile::load("config.json").unwrap();
//! let a = file.resolve(Some("subcommand1")).unwrap();
//! let b = file.resolve(Some("subcommand2")).unwrap();
//! ```

mod error;
mod loader;

pub use error::{ConfigFileError, Result};
pub use loader::{ConfigFile, GLOBAL_SECTION, MAIN_SECTION, load_config};
