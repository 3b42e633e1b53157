//! CLI argument definitions for `nutrinet`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use nutrinet::config::ConfigOverrides;
use nutrinet::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `dpi`, `viewer`, `seed`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Print statistics about the interaction network.
    ///
    /// Counts, density, average degree, the most connected nutrients and group sizes.
    Summary,
}

/// Options for drawing the figure (used when no subcommand is given)
#[derive(Debug, Default, Args)]
pub struct RenderArgs {
    /// Save the figure instead of showing it; format from the extension (png, svg, pdf)
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,

    /// Resolution for raster output
    #[arg(long, value_name = "DPI", value_parser = clap::value_parser!(u32).range(1..))]
    pub dpi: Option<u32>,

    /// Do not draw the legend
    #[arg(long)]
    pub no_legend: bool,

    /// Do not draw edge labels
    #[arg(long)]
    pub no_labels: bool,

    /// Do not draw edges (nodes only)
    #[arg(long)]
    pub no_edges: bool,

    /// Figure title
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Seed the layout for reproducible node positions
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "nutrinet",
    about = "Draw micronutrient interaction networks (synergistic vs. antagonistic)",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug", global = true)]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Load interactions from a TOML dataset instead of the built-in one
    #[arg(long, value_name = "FILE", global = true)]
    pub dataset: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level for this run
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path for this run
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false) for this run
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    #[command(flatten)]
    pub render: RenderArgs,

    /// Subcommand to execute. Without one, the network is drawn.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `--no-*` flags turn the matching render option off; leaving them out
    /// keeps the configured value.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            dpi: self.render.dpi,
            title: self.render.title.clone(),
            legend: self.render.no_legend.then_some(false),
            labels: self.render.no_labels.then_some(false),
            edges: self.render.no_edges.then_some(false),
            seed: self.render.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_no_subcommand_renders() {
        let cli =
            Cli::try_parse_from(["nutrinet", "--save", "out/network.svg", "--seed", "7"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.render.save, Some(PathBuf::from("out/network.svg")));
        assert_eq!(cli.render.seed, Some(7));
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = Cli::try_parse_from(["nutrinet"]).unwrap();
        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.dpi.is_none());
        assert!(overrides.title.is_none());
        assert!(overrides.legend.is_none());
        assert!(overrides.labels.is_none());
        assert!(overrides.edges.is_none());
        assert!(overrides.seed.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli::try_parse_from([
            "nutrinet",
            "--config-level",
            "debug",
            "--config-log-file",
            "/tmp/test.log",
            "--config-verbose",
            "true",
            "--dpi",
            "150",
            "--title",
            "Trace elements",
            "--no-legend",
            "--no-labels",
            "--no-edges",
        ])
        .unwrap();

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.dpi, Some(150));
        assert_eq!(overrides.title, Some("Trace elements".to_string()));
        assert_eq!(overrides.legend, Some(false));
        assert_eq!(overrides.labels, Some(false));
        assert_eq!(overrides.edges, Some(false));
    }

    #[test]
    fn test_zero_dpi_rejected() {
        assert!(Cli::try_parse_from(["nutrinet", "--dpi", "0"]).is_err());
    }

    #[test]
    fn test_dataset_is_global() {
        let cli =
            Cli::try_parse_from(["nutrinet", "summary", "--dataset", "minerals.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Summary)));
        assert_eq!(cli.dataset, Some(PathBuf::from("minerals.toml")));
    }
}
