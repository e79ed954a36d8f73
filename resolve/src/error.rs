//! Error type for CLI resolution.

use argconfig_config::ConfigFileError;
use argconfig_core::ValidationError;
use thiserror::Error;

/// Errors that abort a resolution run.
///
/// None of these are retried; partial state from the failed run is dropped.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Malformed or missing command-line tokens. Also carries help and
    /// version display requests; call [`clap::Error::exit`] to render them.
    #[error(transparent)]
    ArgumentSyntax(#[from] clap::Error),

    /// Config file missing, unreadable, or malformed.
    #[error(transparent)]
    ConfigFile(#[from] ConfigFileError),

    /// Requested subcommand is not registered.
    #[error("unknown subcommand: {0}")]
    UnknownSubcommand(String),

    /// A required key has no usable value after all layers are merged.
    #[error("{subcommand} requires config {key}")]
    MissingRequiredConfig { subcommand: String, key: String },

    /// Contributors produced a structurally invalid argument surface.
    #[error("invalid argument surface: {0}")]
    InvalidSurface(#[from] ValidationError),
}

/// Convenience alias for results with [`ResolveError`].
pub type Result<T> = std::result::Result<T, ResolveError>;
