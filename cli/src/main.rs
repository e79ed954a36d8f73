use argconfig_cli::plugins::{main_command, modules};
use argconfig_cli::{exit_with, init_tracing, print_json};
use argconfig_resolve::cli_parse;
use tracing::debug;

fn main() {
    init_tracing();

    let parsed = match cli_parse(main_command(), &modules(), std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(err) => exit_with(err),
    };
    debug!(subcommand = %parsed.subcommand, "Printing resolved command line");

    if let Err(err) = print_json(&parsed) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
