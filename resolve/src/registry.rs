//! Subcommand discovery and registration.
//!
//! Discovery is a pure function over an explicit list of
//! [`PluginModule`]s supplied by the embedding application: modules carrying
//! the subcommand marker become [`Subcommand`]s, in list order. A
//! [`Registry`] accumulates the output of any number of discovery calls and
//! explicit registrations, in call order, without deduplication.
//!
//! # Example
//!
//! ```
//! use argconfig_core::{PluginModule, Subcommand};
//! use argconfig_resolve::registry::Registry;
//!
//! let modules = vec![
//!     PluginModule::new("app::helpers"),
//!     PluginModule::new("app::build").marked(),
//! ];
//!
//! let mut registry = Registry::new();
//! registry.discover(&modules).register(Subcommand::new("clean"));
//! assert_eq!(registry.names(), vec!["build", "clean"]);
//! ```

use argconfig_core::{PluginModule, Subcommand};
use tracing::debug;

/// Returns the subcommands exported by marked modules, in module order.
pub fn discover(modules: &[PluginModule]) -> Vec<Subcommand> {
    let found: Vec<Subcommand> = modules
        .iter()
        .filter(|module| module.is_subcommand)
        .map(|module| module.subcommand().clone())
        .collect();
    debug!(
        modules = modules.len(),
        subcommands = found.len(),
        "Discovered plugin subcommands"
    );
    found
}

/// Ordered collection of subcommands.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    subcommands: Vec<Subcommand>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every subcommand discovered in `modules`.
    pub fn discover(&mut self, modules: &[PluginModule]) -> &mut Self {
        self.subcommands.extend(discover(modules));
        self
    }

    /// Appends one subcommand.
    pub fn register(&mut self, subcommand: Subcommand) -> &mut Self {
        debug!(name = %subcommand.name, "Registered subcommand");
        self.subcommands.push(subcommand);
        self
    }

    /// All subcommands in registration order.
    pub fn subcommands(&self) -> &[Subcommand] {
        &self.subcommands
    }

    /// Finds a subcommand by name. The first match wins.
    pub fn find(&self, name: &str) -> Option<&Subcommand> {
        find_subcommand(&self.subcommands, name)
    }

    /// Gets all subcommand names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.subcommands.iter().map(|s| s.name.as_str()).collect()
    }

    /// Returns the number of registered subcommands.
    pub fn len(&self) -> usize {
        self.subcommands.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.subcommands.is_empty()
    }
}

/// Linear lookup by name; the first match wins.
pub(crate) fn find_subcommand<'a>(subcommands: &'a [Subcommand], name: &str) -> Option<&'a Subcommand> {
    subcommands.iter().find(|s| s.name == name)
}
