use std::path::PathBuf;

use argconfig_cli::plugins::{main_command, modules};
use argconfig_cli::{exit_with, init_tracing, print_json};
use argconfig_resolve::config_parse;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "argconfig-inspect")]
#[command(about = "Print the resolved configuration of one demo subcommand")]
struct Cli {
    /// Subcommand whose configuration is resolved.
    subcommand: String,
    /// JSON config file supplying defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match config_parse(
        main_command(),
        &modules(),
        &cli.subcommand,
        cli.config.as_deref(),
    ) {
        Ok(config) => config,
        Err(err) => exit_with(err),
    };

    if let Err(err) = print_json(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
