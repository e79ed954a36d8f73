//! Partitioning a parsed namespace.

use argconfig_core::{ConfigMap, ParserNode, SUBCOMMAND_DEST};
use serde_json::Value;

use crate::error::{ResolveError, Result};

/// Moves positional fields out of `namespace`.
///
/// Returns `(main_args, subcommand_args)`: the top level's positional
/// destinations (never the subcommand selector), then, when `active` is
/// set, that subcommand's positional destinations. Removed keys do not
/// remain in `namespace`.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownSubcommand`] if `active` is not part of
/// the surface.
pub fn split(
    surface: &ParserNode,
    namespace: &mut ConfigMap,
    active: Option<&str>,
) -> Result<(ConfigMap, ConfigMap)> {
    let mut main_args = ConfigMap::new();
    for spec in surface.positionals().filter(|s| s.dest != SUBCOMMAND_DEST) {
        let value = namespace.remove(&spec.dest).unwrap_or(Value::Null);
        main_args.insert(spec.dest.clone(), value);
    }

    let mut subcommand_args = ConfigMap::new();
    if let Some(name) = active {
        let sub = surface
            .find_subcommand(name)
            .ok_or_else(|| ResolveError::UnknownSubcommand(name.to_string()))?;
        for spec in sub.node.positionals() {
            let value = namespace.remove(&spec.dest).unwrap_or(Value::Null);
            subcommand_args.insert(spec.dest.clone(), value);
        }
    }

    Ok((main_args, subcommand_args))
}

#[cfg(test)]
mod tests {
    use argconfig_core::{ArgSink, ArgumentSpec, Owner, SubcommandNode};
    use serde_json::json;

    use super::*;

    fn surface() -> ParserNode {
        let mut top = ParserNode::new();
        ArgSink::new(&mut top, Owner::Main)
            .add(ArgumentSpec::positional("main_arg1"))
            .add(ArgumentSpec::option("--main_config1"));
        let mut node = ParserNode::new();
        ArgSink::new(&mut node, Owner::Subcommand("run".into()))
            .add(ArgumentSpec::positional("sub_arg1"))
            .add(ArgumentSpec::option("--sub_config1"));
        top.subcommands.push(SubcommandNode {
            name: "run".into(),
            about: None,
            node,
        });
        top
    }

    fn namespace() -> ConfigMap {
        json!({
            "subcommand": "run",
            "main_arg1": "a",
            "main_config1": "X",
            "sub_arg1": "c",
            "sub_config1": "Y"
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_split_moves_positionals() {
        let mut ns = namespace();
        let (main_args, sub_args) = split(&surface(), &mut ns, Some("run")).unwrap();

        assert_eq!(main_args, *json!({"main_arg1": "a"}).as_object().unwrap());
        assert_eq!(sub_args, *json!({"sub_arg1": "c"}).as_object().unwrap());
        assert!(!ns.contains_key("main_arg1"));
        assert!(!ns.contains_key("sub_arg1"));
        assert_eq!(ns["subcommand"], json!("run"));
        assert_eq!(ns["sub_config1"], json!("Y"));
    }

    #[test]
    fn test_split_without_active_subcommand() {
        let mut ns = namespace();
        let (_, sub_args) = split(&surface(), &mut ns, None).unwrap();
        assert!(sub_args.is_empty());
        assert!(ns.contains_key("sub_arg1"));
    }

    #[test]
    fn test_split_unknown_subcommand() {
        let mut ns = namespace();
        let err = split(&surface(), &mut ns, Some("nope")).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownSubcommand(_)));
    }
}
