//! Shared pieces of the demo binaries: the bundled plugins, logging setup
//! and error reporting.

pub mod plugins;

use argconfig_resolve::ResolveError;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ARGCONFIG_LOG";

/// Installs a stderr `fmt` subscriber filtered by [`LOG_ENV`], `warn` when
/// unset or invalid.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Prints `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

/// Reports `err` and exits.
///
/// Syntax errors and help requests are rendered by clap (usage on stderr
/// with code 2, help on stdout with code 0). Everything else prints
/// `error: ...` and exits with code 1.
pub fn exit_with(err: ResolveError) -> ! {
    match err {
        ResolveError::ArgumentSyntax(err) => err.exit(),
        other => {
            eprintln!("error: {other}");
            std::process::exit(1);
        }
    }
}
