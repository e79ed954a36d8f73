//! Rewriting option defaults from a resolved config file.

use argconfig_core::{ArgumentSpec, CONFIG_DEST, ConfigMap, Owner, ParserNode};
use tracing::debug;

use crate::error::{ResolveError, Result};

const HELP_DEST: &str = "help";

/// Replaces option defaults in `surface` with values from `file_config`.
///
/// Top-level options are rewritten first, then, when `active` names a
/// subcommand, that subcommand's options (globals included). Positionals,
/// the builtin config-path option and `help` are never touched. Returns the
/// number of defaults replaced.
///
/// Call this on a freshly built surface; a surface that has already been
/// parsed must not be reused.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownSubcommand`] if `active` is not part of
/// the surface.
///
/// # Examples
///
/// ```
/// use argconfig_core::{ArgumentSpec, ConfigMap, ParserNode};
/// use argconfig_resolve::inject::apply_file_defaults;
/// use serde_json::json;
///
/// let mut surface = ParserNode::new();
/// surface.add(ArgumentSpec::option("--level"));
///
/// let mut file_config = ConfigMap::new();
/// file_config.insert("level".into(), json!("high"));
///
/// assert_eq!(apply_file_defaults(&mut surface, &file_config, None).unwrap(), 1);
/// assert_eq!(surface.find("level").unwrap().default(), Some(&json!("high")));
/// ```
pub fn apply_file_defaults(
    surface: &mut ParserNode,
    file_config: &ConfigMap,
    active: Option<&str>,
) -> Result<usize> {
    let mut applied = inject(
        surface
            .optionals_mut()
            .filter(|spec| spec.owner != Owner::Builtin && spec.dest != CONFIG_DEST),
        file_config,
    );

    if let Some(name) = active {
        let sub = surface
            .find_subcommand_mut(name)
            .ok_or_else(|| ResolveError::UnknownSubcommand(name.to_string()))?;
        applied += inject(sub.node.optionals_mut(), file_config);
    }

    debug!(
        subcommand = active.unwrap_or("-"),
        applied, "Applied file defaults"
    );
    Ok(applied)
}

fn inject<'a>(specs: impl Iterator<Item = &'a mut ArgumentSpec>, file_config: &ConfigMap) -> usize {
    let mut applied = 0;
    for spec in specs.filter(|spec| spec.dest != HELP_DEST) {
        if let Some(value) = file_config.get(&spec.dest) {
            if spec.set_default(value.clone()) {
                applied += 1;
            }
        }
    }
    applied
}
