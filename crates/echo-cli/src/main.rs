//! Echo InTrack CLI.

use clap::{ColorChoice, Parser};
use echo_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{
    run_add, run_complete, run_delete, run_edit, run_list, run_pathways, run_stats, run_undo,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Add(args) => run_add(args, &cli.config, &cli.data),
        Command::Complete(args) => run_complete(args, &cli.data),
        Command::Undo(args) => run_undo(args, &cli.data),
        Command::Edit(args) => run_edit(args, &cli.config, &cli.data),
        Command::Delete(args) => run_delete(args, &cli.data),
        Command::List => run_list(&cli.data),
        Command::Stats(args) => run_stats(args, &cli.data),
        Command::Pathways => run_pathways(),
    };
    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !cli.verbosity.is_present();
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
