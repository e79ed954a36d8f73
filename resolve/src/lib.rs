//! Two-pass command-line resolution for plugin subcommands with layered
//! JSON configuration.
//!
//! A [`MainCommand`] and any number of [`Subcommand`]s contribute arguments
//! to a two-level surface. Option values are layered: hardcoded defaults,
//! then a JSON config file given with `-c/--config`, then the command line,
//! which always wins.
//!
//! # Main entry points
//!
//! - [`cli_parse`]: discover subcommands from a module list and resolve
//!   the command line.
//! - [`CliParser`]: builder-style registry for explicit registration.
//! - [`config_parse`]: resolve only the configuration of one subcommand.
//!
//! # Example
//!
//! ```
//! use argconfig_core::{ArgumentSpec, MainCommand, Subcommand};
//! use argconfig_resolve::CliParser;
//! use serde_json::json;
//!
//! let main = MainCommand::new("tool").with_positional_args(|sink| {
//!     sink.add(ArgumentSpec::positional("input"));
//! });
//! let build = Subcommand::new("build").with_options(|sink| {
//!     sink.add(ArgumentSpec::option("--profile").with_default("debug"));
//! });
//!
//! let parsed = CliParser::new(main)
//!     .register(build)
//!     .parse_from(["tool", "src", "build", "--profile", "release"])
//!     .unwrap();
//!
//! assert_eq!(parsed.main_args["input"], json!("src"));
//! assert_eq!(parsed.subcommand, "build");
//! assert_eq!(parsed.config["profile"], json!("release"));
//! ```
//!
//! [`MainCommand`]: argconfig_core::MainCommand
//! [`Subcommand`]: argconfig_core::Subcommand

pub mod builder;
pub mod command;
pub mod driver;
mod error;
pub mod inject;
pub mod registry;
pub mod split;

use std::ffi::OsString;
use std::path::Path;

use argconfig_core::{ConfigMap, MainCommand, ParserNode, PluginModule, Subcommand};

pub use driver::ParsedCli;
pub use error::{ResolveError, Result};
use registry::Registry;

/// Main command plus a registry of subcommands, resolved in one shot.
#[derive(Debug, Clone)]
pub struct CliParser {
    main: MainCommand,
    registry: Registry,
}

impl CliParser {
    /// Creates a parser with no subcommands.
    pub fn new(main: MainCommand) -> Self {
        Self {
            main,
            registry: Registry::new(),
        }
    }

    /// Registers one subcommand.
    pub fn register(mut self, subcommand: Subcommand) -> Self {
        self.registry.register(subcommand);
        self
    }

    /// Registers every subcommand discovered in `modules`.
    pub fn discover(mut self, modules: &[PluginModule]) -> Self {
        self.registry.discover(modules);
        self
    }

    /// Registered subcommands in order.
    pub fn subcommands(&self) -> &[Subcommand] {
        self.registry.subcommands()
    }

    /// Builds the argument surface with hardcoded defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidSurface`] for invalid contributions.
    pub fn surface(&self) -> Result<ParserNode> {
        builder::build_surface(&self.main, self.registry.subcommands())
    }

    /// Resolves the process arguments.
    ///
    /// # Errors
    ///
    /// See [`driver::resolve`].
    pub fn parse(&self) -> Result<ParsedCli> {
        self.parse_from(std::env::args_os())
    }

    /// Resolves `args`; the first item is the program name.
    ///
    /// # Errors
    ///
    /// See [`driver::resolve`].
    pub fn parse_from<I, T>(&self, args: I) -> Result<ParsedCli>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        driver::resolve(&self.main, self.registry.subcommands(), &args)
    }

    /// Resolves the configuration of `subcommand` without parsing a command
    /// line.
    ///
    /// # Errors
    ///
    /// See [`driver::resolve_config`].
    pub fn config_for(&self, subcommand: &str, config_file: Option<&Path>) -> Result<ConfigMap> {
        driver::resolve_config(
            &self.main,
            self.registry.subcommands(),
            subcommand,
            config_file,
        )
    }
}

/// Discovers subcommands in `modules` and resolves `args`.
///
/// # Errors
///
/// See [`driver::resolve`].
pub fn cli_parse<I, T>(main: MainCommand, modules: &[PluginModule], args: I) -> Result<ParsedCli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    CliParser::new(main).discover(modules).parse_from(args)
}

/// Discovers subcommands in `modules` and resolves the configuration of
/// `subcommand` alone.
///
/// # Errors
///
/// See [`driver::resolve_config`].
pub fn config_parse(
    main: MainCommand,
    modules: &[PluginModule],
    subcommand: &str,
    config_file: Option<&Path>,
) -> Result<ConfigMap> {
    CliParser::new(main)
        .discover(modules)
        .config_for(subcommand, config_file)
}
