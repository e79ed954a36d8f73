//! Surface and configuration validation.
//!
//! Two kinds of checks live here: structural checks over a built
//! [`ParserNode`] surface ([`validate_surface`]), catching invalid flag
//! spellings, empty names and duplicate subcommands before they reach the
//! parser; and presence checks over a resolved [`ConfigMap`]
//! ([`require_keys`], [`is_truthy`]).
//!
//! # Examples
//!
//! ```
//! use argconfig_core::*;
//! use serde_json::json;
//!
//! let check = require_keys(&["token"]);
//! let mut config = ConfigMap::new();
//! assert_eq!(check(&config).unwrap_err(), MissingField("token".into()));
//!
//! config.insert("token".into(), json!("abc"));
//! assert!(check(&config).is_ok());
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::contract::RequiredCheck;
use crate::types::{ArgumentSpec, ConfigMap, ParserNode};

/// A required destination key that has no usable value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required config: {0}")]
pub struct MissingField(pub String);

/// Structural errors in a built argument surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A spec has an empty destination.
    #[error("argument destination cannot be empty")]
    EmptyDestination,
    /// A subcommand name is empty or whitespace-only.
    #[error("subcommand name cannot be empty")]
    EmptySubcommandName,
    /// Two subcommands share a name.
    #[error("duplicate subcommand: {0}")]
    DuplicateSubcommand(String),
    /// Long flag does not start with `--` or is too short.
    #[error("invalid long flag format: {0}")]
    InvalidLongFlag(String),
    /// Short alias is not alphanumeric.
    #[error("invalid short flag format: -{0}")]
    InvalidShortFlag(char),
}

/// Truthiness of a JSON value.
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are falsy; everything else is
/// truthy.
///
/// # Examples
///
/// ```
/// use argconfig_core::is_truthy;
/// use serde_json::json;
///
/// assert!(is_truthy(&json!("x")));
/// assert!(is_truthy(&json!(3)));
/// assert!(!is_truthy(&json!(null)));
/// assert!(!is_truthy(&json!("")));
/// assert!(!is_truthy(&json!(0.0)));
/// ```
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Builds a check requiring every key in `keys` to be present and truthy.
///
/// Keys are checked in order; the first failing key is reported.
pub fn require_keys(keys: &[&str]) -> RequiredCheck {
    let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    Arc::new(move |config: &ConfigMap| {
        match keys
            .iter()
            .find(|key| !config.get(key.as_str()).is_some_and(is_truthy))
        {
            Some(key) => Err(MissingField(key.clone())),
            None => Ok(()),
        }
    })
}

/// Validates a built argument surface.
///
/// Checks the top-level specs, then each subcommand node: names must be
/// non-empty and unique, and every option spelling well formed.
///
/// # Examples
///
/// ```
/// use argconfig_core::*;
///
/// let mut node = ParserNode::new();
/// node.add(ArgumentSpec::option("--verbose"));
/// assert!(validate_surface(&node).is_empty());
///
/// let mut bad = ParserNode::new();
/// bad.add(ArgumentSpec::option("-verbose"));
/// assert_eq!(
///     validate_surface(&bad),
///     vec![ValidationError::InvalidLongFlag("-verbose".into())]
/// );
/// ```
pub fn validate_surface(node: &ParserNode) -> Vec<ValidationError> {
    let mut errors = validate_specs(&node.specs);
    if !errors.is_empty() {
        return errors;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for sub in &node.subcommands {
        let name = sub.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptySubcommandName);
            return errors;
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateSubcommand(name.to_string()));
            return errors;
        }

        errors.extend(validate_specs(&sub.node.specs));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

fn validate_specs(specs: &[ArgumentSpec]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for spec in specs {
        if spec.dest.trim().is_empty() {
            errors.push(ValidationError::EmptyDestination);
            return errors;
        }

        if let Some(long) = spec.long() {
            if !long.starts_with("--") || long.len() < 3 {
                errors.push(ValidationError::InvalidLongFlag(long.to_string()));
                return errors;
            }
        }

        if let Some(short) = spec.short() {
            if !short.is_alphanumeric() {
                errors.push(ValidationError::InvalidShortFlag(short));
                return errors;
            }
        }
    }

    errors
}
