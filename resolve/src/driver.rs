//! The two-pass resolution state machine.
//!
//! ```text
//! Discover ──(no config path)──────────────────────▶ Finalize
//!    │                                                  ▲
//!    └──(config path)──▶ Reload (file defaults) ────────┘
//! ```
//!
//! `Discover` parses the raw arguments against a surface with hardcoded
//! defaults, only to learn the selected subcommand and the config path.
//! `Reload` loads the file for that subcommand, rewrites the defaults of a
//! freshly built surface, and parses the same arguments again; its result
//! replaces the first one. `Finalize` splits the namespace and runs the
//! subcommand's required-field check.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use argconfig_config::load_config;
use argconfig_core::{
    CONFIG_DEST, ConfigMap, MainCommand, Owner, ParserNode, SUBCOMMAND_DEST, Subcommand,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::builder::build_surface;
use crate::command::{Namespace, parse};
use crate::error::{ResolveError, Result};
use crate::inject::apply_file_defaults;
use crate::registry::find_subcommand;
use crate::split::split;

/// Final outcome of a resolution run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedCli {
    /// Main command positionals.
    pub main_args: ConfigMap,
    /// Selected subcommand.
    pub subcommand: String,
    /// Selected subcommand's positionals.
    pub subcommand_args: ConfigMap,
    /// Every option value after layering defaults, file and command line.
    pub config: ConfigMap,
    /// Config file given with `-c/--config`, if any.
    pub config_file: Option<PathBuf>,
}

impl ParsedCli {
    /// Splits into `(main_args, subcommand, subcommand_args, config,
    /// config_file)`.
    pub fn into_parts(self) -> (ConfigMap, String, ConfigMap, ConfigMap, Option<PathBuf>) {
        (
            self.main_args,
            self.subcommand,
            self.subcommand_args,
            self.config,
            self.config_file,
        )
    }
}

enum Stage {
    Discover,
    Reload {
        subcommand: String,
        config_file: PathBuf,
    },
    Finalize {
        surface: ParserNode,
        namespace: Namespace,
        config_file: Option<PathBuf>,
    },
}

/// Resolves `args` (program name first) for `main` and `subcommands`.
///
/// # Errors
///
/// Returns [`ResolveError::ArgumentSyntax`] for rejected arguments,
/// [`ResolveError::ConfigFile`] when the config file cannot be loaded, and
/// [`ResolveError::MissingRequiredConfig`] when the selected subcommand's
/// required check fails on the final configuration.
pub fn resolve(
    main: &MainCommand,
    subcommands: &[Subcommand],
    args: &[OsString],
) -> Result<ParsedCli> {
    let mut stage = Stage::Discover;
    loop {
        stage = match stage {
            Stage::Discover => {
                let surface = build_surface(main, subcommands)?;
                let namespace = parse_with(main, &surface, args)?;
                let subcommand = selected(&namespace)?;
                let config_file = namespace
                    .string(CONFIG_DEST)
                    .filter(|path| !path.is_empty())
                    .map(PathBuf::from);
                debug!(
                    subcommand = %subcommand,
                    config_file = ?config_file,
                    "Discovered subcommand and config path"
                );

                match config_file {
                    Some(config_file) => Stage::Reload {
                        subcommand,
                        config_file,
                    },
                    None => Stage::Finalize {
                        surface,
                        namespace,
                        config_file: None,
                    },
                }
            }
            Stage::Reload {
                subcommand,
                config_file,
            } => {
                let file_config = load_config(&config_file, Some(&subcommand))?;
                let mut surface = build_surface(main, subcommands)?;
                apply_file_defaults(&mut surface, &file_config, Some(&subcommand))?;
                let namespace = parse_with(main, &surface, args)?;
                debug!(path = %config_file.display(), "Reparsed with file defaults");

                Stage::Finalize {
                    surface,
                    namespace,
                    config_file: Some(config_file),
                }
            }
            Stage::Finalize {
                surface,
                namespace,
                config_file,
            } => return finalize(subcommands, &surface, namespace, config_file),
        };
    }
}

fn parse_with(main: &MainCommand, surface: &ParserNode, args: &[OsString]) -> Result<Namespace> {
    parse(&main.name, main.about.as_deref(), surface, args)
}

fn selected(namespace: &Namespace) -> Result<String> {
    namespace
        .subcommand
        .clone()
        .ok_or_else(|| ResolveError::UnknownSubcommand(String::new()))
}

fn finalize(
    subcommands: &[Subcommand],
    surface: &ParserNode,
    namespace: Namespace,
    config_file: Option<PathBuf>,
) -> Result<ParsedCli> {
    let subcommand = selected(&namespace)?;
    let mut fields = namespace.fields;
    let (main_args, subcommand_args) = split(surface, &mut fields, Some(&subcommand))?;
    fields.remove(SUBCOMMAND_DEST);
    fields.remove(CONFIG_DEST);

    let sub = find_subcommand(subcommands, &subcommand)
        .ok_or_else(|| ResolveError::UnknownSubcommand(subcommand.clone()))?;
    check_required(sub, &fields)?;

    info!(subcommand = %subcommand, keys = fields.len(), "Resolved command line");
    Ok(ParsedCli {
        main_args,
        subcommand,
        subcommand_args,
        config: fields,
        config_file,
    })
}

/// Runs `subcommand`'s required-field check against `config`.
///
/// # Errors
///
/// Returns [`ResolveError::MissingRequiredConfig`] naming the subcommand and
/// the first missing key.
pub fn check_required(subcommand: &Subcommand, config: &ConfigMap) -> Result<()> {
    subcommand
        .validate_required(config)
        .map_err(|missing| ResolveError::MissingRequiredConfig {
            subcommand: subcommand.name.clone(),
            key: missing.0,
        })
}

/// Resolves only the configuration mapping of one subcommand.
///
/// No command line is parsed: the mapping holds the hardcoded option
/// defaults of the main command, the subcommand and the globals, overridden
/// by `config_file` when given. The subcommand's required check runs on the
/// result.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownSubcommand`] if `subcommand` is not
/// registered, [`ResolveError::ConfigFile`] if the file cannot be loaded,
/// and [`ResolveError::MissingRequiredConfig`] if the check fails.
pub fn resolve_config(
    main: &MainCommand,
    subcommands: &[Subcommand],
    subcommand: &str,
    config_file: Option<&Path>,
) -> Result<ConfigMap> {
    let sub = find_subcommand(subcommands, subcommand)
        .ok_or_else(|| ResolveError::UnknownSubcommand(subcommand.to_string()))?;

    let mut surface = build_surface(main, subcommands)?;
    if let Some(path) = config_file {
        let file_config = load_config(path, Some(subcommand))?;
        apply_file_defaults(&mut surface, &file_config, Some(subcommand))?;
    }

    let mut config = ConfigMap::new();
    let sub_node = surface
        .find_subcommand(subcommand)
        .ok_or_else(|| ResolveError::UnknownSubcommand(subcommand.to_string()))?;
    let specs = surface
        .optionals()
        .filter(|spec| spec.owner != Owner::Builtin)
        .chain(sub_node.node.optionals());
    for spec in specs {
        if let Some(default) = spec.default() {
            config.insert(spec.dest.clone(), default.clone());
        }
    }
    config.remove(CONFIG_DEST);

    check_required(sub, &config)?;
    debug!(subcommand, keys = config.len(), "Resolved config only");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use argconfig_core::ArgumentSpec;
    use serde_json::json;

    use super::*;

    fn main_command() -> MainCommand {
        MainCommand::new("prog")
            .with_positional_args(|sink| {
                sink.add(ArgumentSpec::positional("main_arg1"));
            })
            .with_options(|sink| {
                sink.add(ArgumentSpec::option("--level").with_default("low"));
            })
    }

    fn subcommands() -> Vec<Subcommand> {
        vec![
            Subcommand::new("run")
                .with_options(|sink| {
                    sink.add(ArgumentSpec::option("--token"));
                })
                .requiring(&["token"]),
        ]
    }

    fn args(raw: &[&str]) -> Vec<OsString> {
        raw.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_resolve_without_file() {
        let parsed = resolve(
            &main_command(),
            &subcommands(),
            &args(&["prog", "a", "run", "--token", "t"]),
        )
        .unwrap();

        assert_eq!(parsed.subcommand, "run");
        assert_eq!(parsed.main_args["main_arg1"], json!("a"));
        assert!(parsed.subcommand_args.is_empty());
        assert_eq!(parsed.config["level"], json!("low"));
        assert_eq!(parsed.config["token"], json!("t"));
        assert!(!parsed.config.contains_key(CONFIG_DEST));
        assert!(!parsed.config.contains_key(SUBCOMMAND_DEST));
        assert_eq!(parsed.config_file, None);
    }

    #[test]
    fn test_missing_required_reported_after_parse() {
        let err = resolve(&main_command(), &subcommands(), &args(&["prog", "a", "run"]))
            .unwrap_err();
        match err {
            ResolveError::MissingRequiredConfig { subcommand, key } => {
                assert_eq!(subcommand, "run");
                assert_eq!(key, "token");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_config_file_aborts() {
        let err = resolve(
            &main_command(),
            &subcommands(),
            &args(&["prog", "-c", "/nonexistent/argconfig.json", "a", "run"]),
        )
        .unwrap_err();
        assert!(matches!(err, ResolveError::ConfigFile(_)));
    }

    #[test]
    fn test_resolve_config_defaults_only() {
        let config = resolve_config(&main_command(), &subcommands(), "run", None);
        assert!(matches!(
            config,
            Err(ResolveError::MissingRequiredConfig { ref key, .. }) if key == "token"
        ));
    }

    #[test]
    fn test_resolve_config_unknown_subcommand() {
        let err = resolve_config(&main_command(), &subcommands(), "nope", None).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownSubcommand(ref name) if name == "nope"));
    }

    #[test]
    fn test_into_parts_order() {
        let parsed = resolve(
            &main_command(),
            &subcommands(),
            &args(&["prog", "a", "run", "--token", "t"]),
        )
        .unwrap();
        let (main_args, name, sub_args, config, file) = parsed.into_parts();
        assert_eq!(main_args.len(), 1);
        assert_eq!(name, "run");
        assert!(sub_args.is_empty());
        assert_eq!(config.len(), 2);
        assert!(file.is_none());
    }
}
