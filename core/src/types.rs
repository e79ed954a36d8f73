//! Argument surface definitions.
//!
//! This module defines the owned data model for a two-level argument
//! surface: [`ArgumentSpec`] records grouped into [`ParserNode`]s, with one
//! [`SubcommandNode`] per registered subcommand. Every spec is a plain struct
//! owned by the surface, so rewriting a default after construction is a
//! direct field write.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flat mapping from destination key to value.
///
/// Used for parsed namespaces, file sections, and the final resolved
/// configuration.
pub type ConfigMap = serde_json::Map<String, Value>;

/// Destination of the subcommand selector in a parsed namespace.
pub const SUBCOMMAND_DEST: &str = "subcommand";

/// Destination of the builtin config-path option.
pub const CONFIG_DEST: &str = "config";

/// Converts a flag spelling into its destination key.
///
/// Leading dashes are stripped and the remaining dashes become underscores.
///
/// # Examples
///
/// ```
/// use argconfig_core::dest_from_flag;
///
/// assert_eq!(dest_from_flag("--main_config1"), "main_config1");
/// assert_eq!(dest_from_flag("--dry-run"), "dry_run");
/// assert_eq!(dest_from_flag("verbose"), "verbose");
/// ```
pub fn dest_from_flag(flag: &str) -> String {
    flag.trim_start_matches('-').replace('-', "_")
}

/// Which contributor declared a spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    /// Declared by the resolver itself (the config-path option).
    Builtin,
    /// Declared by the main command.
    Main,
    /// Declared by the main command's global-option contributor and copied
    /// into every subcommand node.
    Global,
    /// Declared by the named subcommand.
    Subcommand(String),
}

/// Shape of a declared argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgKind {
    /// Required positional value; has no default.
    Positional,
    /// Named option taking one value.
    Optional {
        /// Long spelling including dashes (e.g. `--main_config1`).
        long: Option<String>,
        /// Short alias without the dash (e.g. `m`).
        short: Option<char>,
        /// Value used when the option is absent from the command line.
        default: Value,
    },
}

/// One declared argument.
///
/// # Examples
///
/// ```
/// use argconfig_core::{ArgumentSpec, Owner};
/// use serde_json::json;
///
/// let opt = ArgumentSpec::option("--main-config2")
///     .with_short('m')
///     .with_default(json!("fallback"));
/// assert_eq!(opt.dest, "main_config2");
/// assert_eq!(opt.default(), Some(&json!("fallback")));
///
/// let pos = ArgumentSpec::positional("main_arg1");
/// assert!(pos.is_positional());
/// assert_eq!(pos.default(), None);
/// assert_eq!(pos.owner, Owner::Main);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// Key the parsed value is stored under.
    pub dest: String,
    /// Positional or optional, with option spellings and default.
    pub kind: ArgKind,
    /// Contributor that declared this spec. Overwritten by the sink that
    /// receives it.
    pub owner: Owner,
    /// Help text shown in usage output.
    pub help: Option<String>,
}

impl ArgumentSpec {
    /// Creates a positional argument named `name`.
    pub fn positional(name: &str) -> Self {
        Self {
            dest: name.to_string(),
            kind: ArgKind::Positional,
            owner: Owner::Main,
            help: None,
        }
    }

    /// Creates an option from a flag spelling.
    ///
    /// A spelling with a single leading dash and one character is treated as
    /// a short-only option; anything else is a long spelling.
    pub fn option(flag: &str) -> Self {
        let (long, short) = match flag.strip_prefix('-') {
            Some(rest) if !rest.starts_with('-') && rest.chars().count() == 1 => {
                (None, rest.chars().next())
            }
            _ => (Some(flag.to_string()), None),
        };
        Self {
            dest: dest_from_flag(flag),
            kind: ArgKind::Optional {
                long,
                short,
                default: Value::Null,
            },
            owner: Owner::Main,
            help: None,
        }
    }

    /// Adds a short alias. No effect on positionals.
    pub fn with_short(mut self, alias: char) -> Self {
        if let ArgKind::Optional { short, .. } = &mut self.kind {
            *short = Some(alias);
        }
        self
    }

    /// Sets the hardcoded default. No effect on positionals.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.set_default(value.into());
        self
    }

    /// Adds help text.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Returns `true` for positional specs.
    pub fn is_positional(&self) -> bool {
        matches!(self.kind, ArgKind::Positional)
    }

    /// Returns the default value of an optional spec.
    pub fn default(&self) -> Option<&Value> {
        match &self.kind {
            ArgKind::Optional { default, .. } => Some(default),
            ArgKind::Positional => None,
        }
    }

    /// Replaces the default of an optional spec.
    ///
    /// Returns `false` (and changes nothing) for positional specs.
    pub fn set_default(&mut self, value: Value) -> bool {
        match &mut self.kind {
            ArgKind::Optional { default, .. } => {
                *default = value;
                true
            }
            ArgKind::Positional => false,
        }
    }

    /// Long spelling, if any.
    pub fn long(&self) -> Option<&str> {
        match &self.kind {
            ArgKind::Optional { long, .. } => long.as_deref(),
            ArgKind::Positional => None,
        }
    }

    /// Short alias, if any.
    pub fn short(&self) -> Option<char> {
        match &self.kind {
            ArgKind::Optional { short, .. } => *short,
            ArgKind::Positional => None,
        }
    }

    /// Returns `true` when this spec answers to any spelling of `other`.
    fn shares_spelling(&self, other: &ArgumentSpec) -> bool {
        (other.long().is_some() && self.long() == other.long())
            || (other.short().is_some() && self.short() == other.short())
    }

    /// Removes the spellings `other` claims. Returns `true` when no spelling
    /// is left.
    fn yield_spellings(&mut self, other: &ArgumentSpec) -> bool {
        if let ArgKind::Optional { long, short, .. } = &mut self.kind {
            if other.long().is_some() && long.as_deref() == other.long() {
                *long = None;
            }
            if other.short().is_some() && *short == other.short() {
                *short = None;
            }
            return long.is_none() && short.is_none();
        }
        false
    }
}

/// A subcommand's own argument node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcommandNode {
    /// Name used to select the subcommand on the command line.
    pub name: String,
    /// Short description shown in usage output.
    pub about: Option<String>,
    /// Positional, option and global specs of this subcommand.
    pub node: ParserNode,
}

/// Ordered collection of argument specs.
///
/// The top-level node also carries the subcommand nodes; subcommand nodes
/// never nest further.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParserNode {
    /// Declared specs in declaration order.
    pub specs: Vec<ArgumentSpec>,
    /// Subcommand nodes in registration order.
    pub subcommands: Vec<SubcommandNode>,
}

impl ParserNode {
    /// Creates an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a spec, resolving conflicts in favour of the newcomer.
    ///
    /// A spec with the same destination replaces the earlier one in place.
    /// Otherwise an earlier option sharing a long or short spelling gives
    /// that spelling up, and is dropped once it has none left.
    ///
    /// # Examples
    ///
    /// ```
    /// use argconfig_core::{ArgumentSpec, ParserNode};
    /// use serde_json::json;
    ///
    /// let mut node = ParserNode::new();
    /// node.add(ArgumentSpec::option("--level").with_default(json!(1)));
    /// node.add(ArgumentSpec::option("--level").with_default(json!(2)));
    /// assert_eq!(node.specs.len(), 1);
    /// assert_eq!(node.find("level").unwrap().default(), Some(&json!(2)));
    /// ```
    pub fn add(&mut self, spec: ArgumentSpec) {
        if !spec.is_positional() {
            let mut index = 0;
            while index < self.specs.len() {
                let existing = &mut self.specs[index];
                if existing.dest != spec.dest
                    && existing.shares_spelling(&spec)
                    && existing.yield_spellings(&spec)
                {
                    self.specs.remove(index);
                    continue;
                }
                index += 1;
            }
        }

        match self.specs.iter_mut().find(|s| s.dest == spec.dest) {
            Some(slot) => *slot = spec,
            None => self.specs.push(spec),
        }
    }

    /// Finds a spec by destination.
    pub fn find(&self, dest: &str) -> Option<&ArgumentSpec> {
        self.specs.iter().find(|s| s.dest == dest)
    }

    /// Positional specs in declaration order.
    pub fn positionals(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.specs.iter().filter(|s| s.is_positional())
    }

    /// Optional specs in declaration order.
    pub fn optionals(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.specs.iter().filter(|s| !s.is_positional())
    }

    /// Mutable optional specs in declaration order.
    pub fn optionals_mut(&mut self) -> impl Iterator<Item = &mut ArgumentSpec> {
        self.specs.iter_mut().filter(|s| !s.is_positional())
    }

    /// Finds a subcommand node by name. The first match wins.
    pub fn find_subcommand(&self, name: &str) -> Option<&SubcommandNode> {
        self.subcommands.iter().find(|s| s.name == name)
    }

    /// Mutable variant of [`find_subcommand`](Self::find_subcommand).
    pub fn find_subcommand_mut(&mut self, name: &str) -> Option<&mut SubcommandNode> {
        self.subcommands.iter_mut().find(|s| s.name == name)
    }

    /// Gets all subcommand names.
    pub fn subcommand_names(&self) -> Vec<&str> {
        self.subcommands.iter().map(|s| s.name.as_str()).collect()
    }
}
