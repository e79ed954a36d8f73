//! Parser surface assembly.
//!
//! [`build_surface`] asks every contributor to declare its arguments and
//! files them into a two-level [`ParserNode`]:
//!
//! - top level: the builtin `-c/--config` option, the main command's
//!   positionals, then its options;
//! - one [`SubcommandNode`] per subcommand, in registry order: the
//!   subcommand's positionals, its options, then the main command's global
//!   options.
//!
//! Construction is deterministic, so building twice from the same inputs
//! yields equal surfaces. The resolver relies on this to rebuild a fresh
//! surface for the second parse.

use argconfig_core::{
    ArgSink, ArgumentSpec, CONFIG_DEST, MainCommand, Owner, ParserNode, Subcommand,
    SubcommandNode, validate_surface,
};
use tracing::debug;

use crate::error::Result;

/// Builds the argument surface for `main` and `subcommands`.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidSurface`](crate::ResolveError::InvalidSurface)
/// if the contributed specs fail [`validate_surface`], e.g. when two
/// subcommands share a name.
///
/// # Examples
///
/// ```
/// use argconfig_core::{ArgumentSpec, MainCommand, Subcommand};
/// use argconfig_resolve::builder::build_surface;
///
/// let main = MainCommand::new("tool").with_global_options(|sink| {
///     sink.add(ArgumentSpec::option("--verbose"));
/// });
/// let run = Subcommand::new("run").with_positional_args(|sink| {
///     sink.add(ArgumentSpec::positional("script"));
/// });
///
/// let surface = build_surface(&main, &[run]).unwrap();
/// let run_node = &surface.find_subcommand("run").unwrap().node;
/// assert!(run_node.find("script").is_some());
/// assert!(run_node.find("verbose").is_some());
/// assert!(surface.find("config").is_some());
/// ```
pub fn build_surface(main: &MainCommand, subcommands: &[Subcommand]) -> Result<ParserNode> {
    let mut surface = ParserNode::new();
    surface.add(config_path_spec());

    main.contribute_positional_args(&mut ArgSink::new(&mut surface, Owner::Main));
    main.contribute_options(&mut ArgSink::new(&mut surface, Owner::Main));

    for sub in subcommands {
        surface.subcommands.push(build_subcommand_node(main, sub));
    }

    if let Some(err) = validate_surface(&surface).into_iter().next() {
        return Err(err.into());
    }

    debug!(
        command = %main.name,
        specs = surface.specs.len(),
        subcommands = surface.subcommands.len(),
        "Built argument surface"
    );
    Ok(surface)
}

fn build_subcommand_node(main: &MainCommand, sub: &Subcommand) -> SubcommandNode {
    let mut node = ParserNode::new();
    let owner = Owner::Subcommand(sub.name.clone());

    sub.contribute_positional_args(&mut ArgSink::new(&mut node, owner.clone()));
    sub.contribute_options(&mut ArgSink::new(&mut node, owner));
    main.contribute_global_options(&mut ArgSink::new(&mut node, Owner::Global));

    SubcommandNode {
        name: sub.name.clone(),
        about: sub.about.clone(),
        node,
    }
}

/// The `-c/--config` option every surface starts with.
fn config_path_spec() -> ArgumentSpec {
    let mut spec = ArgumentSpec::option(&format!("--{CONFIG_DEST}"))
        .with_short('c')
        .with_help("Path to a JSON config file supplying defaults");
    spec.owner = Owner::Builtin;
    spec
}

#[cfg(test)]
mod tests {
    use argconfig_core::ValidationError;
    use serde_json::Value;

    use super::*;
    use crate::ResolveError;

    fn sample_main() -> MainCommand {
        MainCommand::new("prog")
            .with_positional_args(|sink| {
                sink.add(ArgumentSpec::positional("main_arg1"))
                    .add(ArgumentSpec::positional("main_arg2"));
            })
            .with_options(|sink| {
                sink.add(ArgumentSpec::option("--main_config1"));
            })
            .with_global_options(|sink| {
                sink.add(ArgumentSpec::option("--global_config1"));
            })
    }

    fn sample_sub(name: &str) -> Subcommand {
        let arg = format!("{name}_arg");
        let opt = format!("--{name}_opt");
        Subcommand::new(name)
            .with_positional_args(move |sink| {
                sink.add(ArgumentSpec::positional(&arg));
            })
            .with_options(move |sink| {
                sink.add(ArgumentSpec::option(&opt));
            })
    }

    #[test]
    fn test_top_level_order() {
        let surface = build_surface(&sample_main(), &[]).unwrap();
        let dests: Vec<&str> = surface.specs.iter().map(|s| s.dest.as_str()).collect();
        assert_eq!(dests, vec!["config", "main_arg1", "main_arg2", "main_config1"]);
        assert_eq!(surface.find("config").unwrap().owner, Owner::Builtin);
    }

    #[test]
    fn test_subcommand_node_contents_and_owners() {
        let surface = build_surface(&sample_main(), &[sample_sub("one")]).unwrap();
        let node = &surface.find_subcommand("one").unwrap().node;

        let dests: Vec<&str> = node.specs.iter().map(|s| s.dest.as_str()).collect();
        assert_eq!(dests, vec!["one_arg", "one_opt", "global_config1"]);
        assert_eq!(node.find("one_opt").unwrap().owner, Owner::Subcommand("one".into()));
        assert_eq!(node.find("global_config1").unwrap().owner, Owner::Global);
        assert!(surface.find("global_config1").is_none());
    }

    #[test]
    fn test_subcommands_follow_registry_order() {
        let subs = [sample_sub("b"), sample_sub("a"), sample_sub("c")];
        let surface = build_surface(&sample_main(), &subs).unwrap();
        assert_eq!(surface.subcommand_names(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_subcommand_rejected() {
        let subs = [sample_sub("dup"), sample_sub("dup")];
        let err = build_surface(&sample_main(), &subs).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidSurface(ValidationError::DuplicateSubcommand(ref name)) if name == "dup"
        ));
    }

    #[test]
    fn test_main_option_can_take_config_short_alias() {
        let main = MainCommand::new("prog").with_options(|sink| {
            sink.add(ArgumentSpec::option("--count").with_short('c'));
        });
        let surface = build_surface(&main, &[]).unwrap();

        assert_eq!(surface.find("config").unwrap().short(), None);
        assert_eq!(surface.find("count").unwrap().short(), Some('c'));
    }

    #[test]
    fn test_defaults_start_from_contributors() {
        let main = MainCommand::new("prog").with_options(|sink| {
            sink.add(ArgumentSpec::option("--level").with_default(3));
        });
        let surface = build_surface(&main, &[]).unwrap();
        assert_eq!(surface.find("level").unwrap().default(), Some(&Value::from(3)));
    }

    #[test]
    fn test_construction_is_deterministic() {
        let subs = [sample_sub("x"), sample_sub("y")];
        let first = build_surface(&sample_main(), &subs).unwrap();
        let second = build_surface(&sample_main(), &subs).unwrap();
        assert_eq!(first, second);
    }
}
