//! Command-line interface entry point for `nutrinet`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use nutrinet::config::Config;
use nutrinet::logger::{
    enable_debug, enable_verbose, init_file_logging, is_file_logging_enabled, set_level, Level,
};
use nutrinet::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup; overrides only apply when drawing
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    if !matches!(args.command, Some(Command::Config { .. })) {
        config.apply_overrides(&args.to_config_overrides());
    }

    // Runtime log level: CLI flag, then config logging.level, then warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path =
        (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file));
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let dataset = args.dataset.as_deref();
    let result = match args.command {
        Some(Command::Config { subcommand }) => {
            commands::config::run(subcommand, &mut config, &defaults)
        }
        Some(Command::Summary) => commands::summary::run(dataset).map_err(|e| e.to_string()),
        None => commands::render::run(dataset, args.render.save.as_deref(), &config)
            .map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            // Without a log file `error!` would print the same line to stderr
            if is_file_logging_enabled() {
                error!("{message}");
            }
            eprintln!("✗ {message}");
            ExitCode::FAILURE
        }
    }
}
