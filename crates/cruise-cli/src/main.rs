//! `cruise`: convert cruise CSV data to CF trajectory files.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use cruise_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use cruise_cli::commands::{run_convert, run_fields, run_inspect};
use cruise_cli::logging::{LogConfig, LogFormat, init_logging};
use cruise_cli::summary::{print_convert_summary, print_inspect};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Convert(args) => match run_convert(&args) {
            Ok(result) => {
                print_convert_summary(&result);
                0
            }
            Err(error) => report(&error),
        },
        Command::Inspect(args) => match run_inspect(&args) {
            Ok(result) if args.json => match serde_json::to_string_pretty(&result) {
                Ok(json) => {
                    println!("{json}");
                    0
                }
                Err(error) => report(&error.into()),
            },
            Ok(result) => {
                print_inspect(&result);
                0
            }
            Err(error) => report(&error),
        },
        Command::Fields => match run_fields() {
            Ok(()) => 0,
            Err(error) => report(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
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
