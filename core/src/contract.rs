//! Plugin contribution contract.
//!
//! A subcommand is an explicit capability record: each contribution point is
//! an optional shared closure, and an absent closure is a no-op. The main
//! command has the same shape plus a global-option contributor whose specs
//! are copied into every subcommand node.
//!
//! # Example
//!
//! ```
//! use argconfig_core::*;
//!
//! let sub = Subcommand::new("deploy")
//!     .with_positional_args(|sink| {
//!         sink.add(ArgumentSpec::positional("target"));
//!     })
//!     .with_options(|sink| {
//!         sink.add(ArgumentSpec::option("--region").with_short('r'));
//!     })
//!     .requiring(&["region"]);
//!
//! let mut node = ParserNode::new();
//! sub.contribute_options(&mut ArgSink::new(&mut node, Owner::Subcommand("deploy".into())));
//! assert!(node.find("region").is_some());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::types::{ArgumentSpec, ConfigMap, Owner, ParserNode};
use crate::validate::{MissingField, require_keys};

/// Closure that declares arguments into a sink.
pub type Contributor = Arc<dyn Fn(&mut ArgSink<'_>) + Send + Sync>;

/// Closure that checks a resolved config mapping.
///
/// Returns the first missing destination key as the error.
pub type RequiredCheck = Arc<dyn Fn(&ConfigMap) -> Result<(), MissingField> + Send + Sync>;

/// Receives the specs a contributor declares and files them into a node
/// under a fixed owner.
pub struct ArgSink<'a> {
    node: &'a mut ParserNode,
    owner: Owner,
}

impl<'a> ArgSink<'a> {
    /// Creates a sink writing into `node` on behalf of `owner`.
    pub fn new(node: &'a mut ParserNode, owner: Owner) -> Self {
        Self { node, owner }
    }

    /// Declares one argument. Conflicts follow [`ParserNode::add`].
    pub fn add(&mut self, mut spec: ArgumentSpec) -> &mut Self {
        spec.owner = self.owner.clone();
        self.node.add(spec);
        self
    }
}

/// A pluggable subcommand.
#[derive(Clone)]
pub struct Subcommand {
    /// Name used to select this subcommand.
    pub name: String,
    /// Short description shown in usage output.
    pub about: Option<String>,
    positional_args: Option<Contributor>,
    options: Option<Contributor>,
    required: Option<RequiredCheck>,
}

impl Subcommand {
    /// Creates a subcommand with no contributions.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            about: None,
            positional_args: None,
            options: None,
            required: None,
        }
    }

    /// Adds a description.
    pub fn with_about(mut self, about: &str) -> Self {
        self.about = Some(about.to_string());
        self
    }

    /// Sets the positional-argument contributor.
    pub fn with_positional_args(
        mut self,
        f: impl Fn(&mut ArgSink<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.positional_args = Some(Arc::new(f));
        self
    }

    /// Sets the option contributor.
    pub fn with_options(mut self, f: impl Fn(&mut ArgSink<'_>) + Send + Sync + 'static) -> Self {
        self.options = Some(Arc::new(f));
        self
    }

    /// Sets a custom required-field check.
    pub fn with_required_check(
        mut self,
        f: impl Fn(&ConfigMap) -> Result<(), MissingField> + Send + Sync + 'static,
    ) -> Self {
        self.required = Some(Arc::new(f));
        self
    }

    /// Requires each of `keys` to hold a truthy value after resolution.
    pub fn requiring(mut self, keys: &[&str]) -> Self {
        self.required = Some(require_keys(keys));
        self
    }

    /// Runs the positional-argument contributor, if any.
    pub fn contribute_positional_args(&self, sink: &mut ArgSink<'_>) {
        if let Some(f) = &self.positional_args {
            f(sink);
        }
    }

    /// Runs the option contributor, if any.
    pub fn contribute_options(&self, sink: &mut ArgSink<'_>) {
        if let Some(f) = &self.options {
            f(sink);
        }
    }

    /// Runs the required-field check. A subcommand without one always
    /// passes.
    ///
    /// # Errors
    ///
    /// Returns the first [`MissingField`] reported by the check.
    pub fn validate_required(&self, config: &ConfigMap) -> Result<(), MissingField> {
        match &self.required {
            Some(check) => check(config),
            None => Ok(()),
        }
    }

    /// Returns `true` if a required-field check is declared.
    pub fn has_required_check(&self) -> bool {
        self.required.is_some()
    }
}

impl fmt::Debug for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subcommand")
            .field("name", &self.name)
            .field("about", &self.about)
            .field("positional_args", &self.positional_args.is_some())
            .field("options", &self.options.is_some())
            .field("required", &self.required.is_some())
            .finish()
    }
}

/// The top-level program identity.
#[derive(Clone)]
pub struct MainCommand {
    /// Program name shown in usage output.
    pub name: String,
    /// Short description shown in usage output.
    pub about: Option<String>,
    positional_args: Option<Contributor>,
    options: Option<Contributor>,
    global_options: Option<Contributor>,
}

impl MainCommand {
    /// Creates a main command with no contributions.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            about: None,
            positional_args: None,
            options: None,
            global_options: None,
        }
    }

    /// Adds a description.
    pub fn with_about(mut self, about: &str) -> Self {
        self.about = Some(about.to_string());
        self
    }

    /// Sets the positional-argument contributor.
    pub fn with_positional_args(
        mut self,
        f: impl Fn(&mut ArgSink<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.positional_args = Some(Arc::new(f));
        self
    }

    /// Sets the option contributor.
    pub fn with_options(mut self, f: impl Fn(&mut ArgSink<'_>) + Send + Sync + 'static) -> Self {
        self.options = Some(Arc::new(f));
        self
    }

    /// Sets the contributor for options shared by every subcommand.
    pub fn with_global_options(
        mut self,
        f: impl Fn(&mut ArgSink<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.global_options = Some(Arc::new(f));
        self
    }

    /// Runs the positional-argument contributor, if any.
    pub fn contribute_positional_args(&self, sink: &mut ArgSink<'_>) {
        if let Some(f) = &self.positional_args {
            f(sink);
        }
    }

    /// Runs the option contributor, if any.
    pub fn contribute_options(&self, sink: &mut ArgSink<'_>) {
        if let Some(f) = &self.options {
            f(sink);
        }
    }

    /// Runs the global-option contributor, if any.
    pub fn contribute_global_options(&self, sink: &mut ArgSink<'_>) {
        if let Some(f) = &self.global_options {
            f(sink);
        }
    }
}

impl fmt::Debug for MainCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainCommand")
            .field("name", &self.name)
            .field("about", &self.about)
            .field("positional_args", &self.positional_args.is_some())
            .field("options", &self.options.is_some())
            .field("global_options", &self.global_options.is_some())
            .finish()
    }
}

/// A unit of plugin code offered to discovery.
///
/// Only modules carrying the subcommand marker become subcommands; the
/// subcommand is named after the last segment of the module path.
///
/// # Examples
///
/// ```
/// use argconfig_core::PluginModule;
///
/// let module = PluginModule::new("tools::deploy")
///     .marked()
///     .exports(|sub| sub.with_about("Deploy a build"));
/// assert!(module.is_subcommand);
/// assert_eq!(module.subcommand().name, "deploy");
///
/// let helper = PluginModule::new("tools::shared");
/// assert!(!helper.is_subcommand);
/// ```
#[derive(Debug, Clone)]
pub struct PluginModule {
    /// Module path, segments separated by `::` or `.`.
    pub path: String,
    /// Capability marker identifying the module as a subcommand.
    pub is_subcommand: bool,
    exports: Subcommand,
}

impl PluginModule {
    /// Creates an unmarked module with no exports.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            is_subcommand: false,
            exports: Subcommand::new(module_leaf(path)),
        }
    }

    /// Sets the subcommand capability marker.
    pub fn marked(mut self) -> Self {
        self.is_subcommand = true;
        self
    }

    /// Configures the contributions this module exports.
    pub fn exports(mut self, f: impl FnOnce(Subcommand) -> Subcommand) -> Self {
        let name = self.exports.name.clone();
        self.exports = f(self.exports);
        self.exports.name = name;
        self
    }

    /// Returns the subcommand this module exports.
    pub fn subcommand(&self) -> &Subcommand {
        &self.exports
    }
}

/// Last segment of a module path.
fn module_leaf(path: &str) -> &str {
    path.rsplit(|c: char| c == ':' || c == '.')
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
}
