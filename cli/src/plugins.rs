//! Bundled demo plugins.
//!
//! `argconfig_demo.*` ships the main command and two subcommands;
//! `argconfig_ext.ex_subcommand1` stands in for a third-party plugin.
//! `argconfig_demo.util` carries no subcommand marker and is skipped by
//! discovery.

use argconfig_core::{ArgumentSpec, MainCommand, PluginModule, Subcommand};

/// Program name shown in usage text.
pub const PROGRAM: &str = "argconfig-demo";

/// The demo main command with its positionals, options and globals.
pub fn main_command() -> MainCommand {
    MainCommand::new(PROGRAM)
        .with_about("Plugin subcommands with layered JSON configuration")
        .with_positional_args(|sink| {
            sink.add(ArgumentSpec::positional("main_arg1").with_help("First main argument"))
                .add(ArgumentSpec::positional("main_arg2").with_help("Second main argument"));
        })
        .with_options(|sink| {
            sink.add(ArgumentSpec::option("--main_config1").with_help("First main setting"))
                .add(
                    ArgumentSpec::option("--main_config2")
                        .with_short('m')
                        .with_help("Second main setting"),
                );
        })
        .with_global_options(|sink| {
            sink.add(
                ArgumentSpec::option("--global_config1")
                    .with_help("Setting shared by every subcommand"),
            )
            .add(ArgumentSpec::option("--global_config2").with_help("Another shared setting"));
        })
}

/// Every bundled module, marked or not, in discovery order.
pub fn modules() -> Vec<PluginModule> {
    vec![
        PluginModule::new("argconfig_demo.subcommand1")
            .marked()
            .exports(|sub| {
                sub.with_about("First demo subcommand")
                    .with_positional_args(|sink| {
                        sink.add(ArgumentSpec::positional("sub1_arg1"))
                            .add(ArgumentSpec::positional("sub1_arg2"));
                    })
                    .with_options(|sink| {
                        sink.add(ArgumentSpec::option("--sub1_config1").with_help("Required"))
                            .add(ArgumentSpec::option("--sub1_config2"));
                    })
                    .requiring(&["sub1_config1"])
            }),
        PluginModule::new("argconfig_demo.subcommand2")
            .marked()
            .exports(|sub| {
                sub.with_about("Second demo subcommand")
                    .with_positional_args(|sink| {
                        sink.add(ArgumentSpec::positional("sub2_arg1"))
                            .add(ArgumentSpec::positional("sub2_arg2"));
                    })
                    .with_options(|sink| {
                        sink.add(ArgumentSpec::option("--sub2_config1").with_help("Required"))
                            .add(ArgumentSpec::option("--sub2_config2"));
                    })
                    .requiring(&["sub2_config1"])
            }),
        PluginModule::new("argconfig_demo.util"),
        PluginModule::new("argconfig_ext.ex_subcommand1")
            .marked()
            .exports(external),
    ]
}

fn external(sub: Subcommand) -> Subcommand {
    sub.with_about("Subcommand from an external plugin package")
        .with_positional_args(|sink| {
            sink.add(ArgumentSpec::positional("ex1_arg1"))
                .add(ArgumentSpec::positional("ex1_arg2"));
        })
        .with_options(|sink| {
            sink.add(ArgumentSpec::option("--ex1_config1").with_help("Required"))
                .add(ArgumentSpec::option("--ex1_config2"));
        })
        .requiring(&["ex1_config1"])
}
