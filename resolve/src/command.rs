//! Rendering a surface into `clap` commands and reading matches back.
//!
//! The [`ParserNode`] surface stays the source of truth: clap only sees
//! argument shapes, never defaults. After parsing, every option whose value
//! did not come from the command line takes the default recorded in its
//! spec, so a rewritten default needs no change on the clap side.
//!
//! Parsing runs in two steps. The top-level command holds the main
//! positionals followed by a trailing selector argument; the selector's
//! first value names the subcommand and the rest of the command line is
//! handed, untouched, to that subcommand's own command. Main positionals are
//! therefore always filled before a subcommand name is recognised.

use std::collections::HashSet;
use std::ffi::OsString;

use argconfig_core::{
    ArgKind, ArgumentSpec, ConfigMap, ParserNode, SUBCOMMAND_DEST, SubcommandNode,
};
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use serde_json::Value;

use crate::error::Result;

/// Clap id of the trailing selector argument.
const SELECTOR_ID: &str = "argconfig::selector";

/// Parsed field set of one run: every declared destination of the top
/// level and of the selected subcommand, plus the selector.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    /// Selected subcommand name.
    pub subcommand: Option<String>,
    /// Destination → value, selector included under
    /// [`SUBCOMMAND_DEST`].
    pub fields: ConfigMap,
}

impl Namespace {
    /// Value of a string field, if set.
    pub fn string(&self, dest: &str) -> Option<&str> {
        self.fields.get(dest).and_then(Value::as_str)
    }
}

/// Renders the top level of `surface` as a clap command named `name`.
///
/// The subcommand selector is a required trailing argument that captures
/// the rest of the command line. Repeating an option keeps the last
/// occurrence.
pub fn render(name: &str, about: Option<&str>, surface: &ParserNode) -> Command {
    let mut cmd = configure(Command::new(name.to_string()), surface).arg(selector_arg());
    if let Some(about) = about {
        cmd = cmd.about(about.to_string());
    }
    if !surface.subcommands.is_empty() {
        cmd = cmd.after_help(subcommand_listing(surface));
    }
    cmd
}

/// Renders one subcommand node; usage shows `<parent> <subcommand>`.
pub fn render_subcommand(parent: &str, sub: &SubcommandNode) -> Command {
    let mut cmd = configure(Command::new(sub.name.clone()), &sub.node)
        .bin_name(format!("{parent} {}", sub.name));
    if let Some(about) = &sub.about {
        cmd = cmd.about(about.clone());
    }
    cmd
}

fn selector_arg() -> Arg {
    Arg::new(SELECTOR_ID)
        .value_name("SUBCOMMAND")
        .help("Subcommand to run, followed by its arguments")
        .required(true)
        .num_args(1..)
        .trailing_var_arg(true)
        .allow_hyphen_values(true)
        .value_parser(value_parser!(OsString))
}

fn subcommand_listing(surface: &ParserNode) -> String {
    let width = surface
        .subcommands
        .iter()
        .map(|sub| sub.name.len())
        .max()
        .unwrap_or(0);
    let mut listing = String::from("Subcommands:");
    for sub in &surface.subcommands {
        listing.push_str(&format!(
            "\n  {:width$}  {}",
            sub.name,
            sub.about.as_deref().unwrap_or("")
        ));
    }
    listing
}

fn configure(mut cmd: Command, node: &ParserNode) -> Command {
    cmd = cmd.args_override_self(true);
    if claims_help(node) {
        cmd = cmd.disable_help_flag(true);
    }
    for spec in &node.specs {
        cmd = cmd.arg(to_arg(spec));
    }
    cmd
}

/// Returns `true` when a contributed option takes `-h` or `--help`.
fn claims_help(node: &ParserNode) -> bool {
    node.optionals()
        .any(|spec| spec.short() == Some('h') || spec.long() == Some("--help"))
}

fn to_arg(spec: &ArgumentSpec) -> Arg {
    let mut arg = Arg::new(spec.dest.clone())
        .action(ArgAction::Set)
        .allow_negative_numbers(true);
    match &spec.kind {
        ArgKind::Positional => {
            arg = arg.required(true);
        }
        ArgKind::Optional { long, short, .. } => {
            if let Some(long) = long {
                arg = arg.long(long.trim_start_matches('-').to_string());
            }
            if let Some(short) = short {
                arg = arg.short(*short);
            }
            arg = arg.value_name(spec.dest.to_uppercase());
        }
    }
    if let Some(help) = &spec.help {
        arg = arg.help(help.clone());
    }
    arg
}

/// Parses `args` (program name first) against `surface`.
///
/// # Errors
///
/// Returns [`ResolveError::ArgumentSyntax`](crate::ResolveError::ArgumentSyntax)
/// when clap rejects the arguments, the selector names no subcommand, or a
/// help/version display is requested.
pub fn parse(
    name: &str,
    about: Option<&str>,
    surface: &ParserNode,
    args: &[OsString],
) -> Result<Namespace> {
    let mut cmd = render(name, about, surface);
    let top = cmd.try_get_matches_from_mut(args)?;

    let mut rest = top
        .get_many::<OsString>(SELECTOR_ID)
        .into_iter()
        .flatten()
        .cloned();
    let selector = match rest.next() {
        Some(selector) => selector,
        None => {
            return Err(cmd
                .error(ErrorKind::MissingSubcommand, "a subcommand is required")
                .into());
        }
    };
    let sub = match selector.to_str().and_then(|s| surface.find_subcommand(s)) {
        Some(sub) => sub,
        None => {
            let message = format!(
                "unrecognized subcommand '{}'",
                selector.to_string_lossy()
            );
            return Err(cmd.error(ErrorKind::InvalidSubcommand, message).into());
        }
    };

    let sub_args: Vec<OsString> = std::iter::once(selector).chain(rest).collect();
    let sub_matches = render_subcommand(name, sub).try_get_matches_from(sub_args)?;
    Ok(collect(surface, &top, sub, &sub_matches))
}

/// Builds the namespace from clap matches and spec defaults.
///
/// Subcommand fields are written after top-level ones, except that a
/// top-level value given on the command line is never replaced by a
/// subcommand value that was not.
fn collect(
    surface: &ParserNode,
    top: &ArgMatches,
    sub: &SubcommandNode,
    sub_matches: &ArgMatches,
) -> Namespace {
    let mut fields = ConfigMap::new();
    let pinned = collect_specs(&surface.specs, top, &mut fields, &HashSet::new());
    collect_specs(&sub.node.specs, sub_matches, &mut fields, &pinned);

    fields.insert(SUBCOMMAND_DEST.to_string(), Value::String(sub.name.clone()));
    Namespace {
        subcommand: Some(sub.name.clone()),
        fields,
    }
}

/// Writes one field per spec; returns the destinations set from the
/// command line. Destinations in `pinned` are only overwritten by command
/// line values.
fn collect_specs(
    specs: &[ArgumentSpec],
    matches: &ArgMatches,
    fields: &mut ConfigMap,
    pinned: &HashSet<String>,
) -> HashSet<String> {
    let mut from_cli = HashSet::new();
    for spec in specs {
        let cli_value = match matches.value_source(&spec.dest) {
            Some(ValueSource::CommandLine) => matches
                .get_one::<String>(&spec.dest)
                .map(|v| Value::String(v.clone())),
            _ => None,
        };
        let value = match cli_value {
            Some(value) => {
                from_cli.insert(spec.dest.clone());
                value
            }
            None if pinned.contains(&spec.dest) => continue,
            None => spec.default().cloned().unwrap_or(Value::Null),
        };
        fields.insert(spec.dest.clone(), value);
    }
    from_cli
}
