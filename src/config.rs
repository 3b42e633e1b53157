//! Configuration module for `nutrinet`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the nutrinet config directory inside config values
const DIR_VARIABLE: &str = "$NUTRINET";

/// Title used when the config file has no `title` key
const DEFAULT_TITLE: &str = "Micronutrient Interaction Network";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Figure rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Figure width in inches
    pub width: f32,
    /// Figure height in inches
    pub height: f32,
    /// Raster resolution in dots per inch
    pub dpi: u32,
    /// Figure title (empty for none)
    pub title: String,
    /// Draw the legend
    pub legend: bool,
    /// Draw edge labels
    pub labels: bool,
    /// Draw edges
    pub edges: bool,
    /// Edge curvature relative to the edge length
    pub curvature: f32,
    /// Viewer command used when no output path is given (empty to auto-detect)
    pub viewer: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 12.0,
            height: 12.0,
            dpi: 300,
            title: DEFAULT_TITLE.to_string(),
            legend: true,
            labels: true,
            edges: true,
            curvature: 0.15,
            viewer: String::new(),
        }
    }
}

/// Force-directed layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Number of simulation steps
    pub iterations: u32,
    /// Repulsion between every pair of nodes
    pub charge: f32,
    /// Spring stiffness along edges
    pub spring: f32,
    /// Seed for the initial placement (omit for a different layout on each run)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 600,
            charge: 150.0,
            spring: 0.05,
            seed: None,
        }
    }
}

/// Output path configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Base directory for relative `--save` paths (empty for the working directory)
    #[serde(default)]
    pub output_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Render settings
    #[serde(default)]
    pub render: RenderConfig,
    /// Layout settings
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override raster resolution
    pub dpi: Option<u32>,
    /// Override figure title
    pub title: Option<String>,
    /// Override legend visibility
    pub legend: Option<bool>,
    /// Override edge label visibility
    pub labels: Option<bool>,
    /// Override edge visibility
    pub edges: Option<bool>,
    /// Override layout seed
    pub seed: Option<u64>,
}

impl Config {
    /// Get the `$NUTRINET` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/nutrinet`
    /// - macOS: `~/Library/Application Support/nutrinet`
    /// - Windows: `%APPDATA%\nutrinet`
    #[must_use]
    pub fn get_nutrinet_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nutrinet")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled in; numeric and boolean fields already fall back to serde defaults.
    /// `render.title` is left alone since an empty title means "no title".
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }
        if self.paths.output_dir.is_empty() && !defaults.paths.output_dir.is_empty() {
            self.paths.output_dir.clone_from(&defaults.paths.output_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only affect this run; the configuration file is not modified.
    /// Only non-`None` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(dpi) = overrides.dpi {
            self.render.dpi = dpi;
        }
        if let Some(title) = &overrides.title {
            self.render.title.clone_from(title);
        }
        if let Some(legend) = overrides.legend {
            self.render.legend = legend;
        }
        if let Some(labels) = overrides.labels {
            self.render.labels = labels;
        }
        if let Some(edges) = overrides.edges {
            self.render.edges = edges;
        }

        if let Some(seed) = overrides.seed {
            self.layout.seed = Some(seed);
        }
    }

    /// Get the user config file path
    ///
    /// - `config.toml` for release builds
    /// - `dconfig.toml` for debug builds (allows separate debug config)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_nutrinet_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$NUTRINET` in a string to the nutrinet config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_nutrinet_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults. `$NUTRINET` is expanded in
    /// path-like values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.render.viewer = Self::expand_variables(&config.render.viewer);
        config.paths.output_dir = Self::expand_variables(&config.paths.output_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from defaults, save if changed
    /// - Otherwise (first run): write the defaults to the config file and return them
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the platform-specific config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `width`, `height`, `dpi`,
    /// `title`, `legend`, `labels`, `edges`, `curvature`, `viewer`,
    /// `iterations`, `charge`, `spring`, `seed`, `output_dir`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "width" => Some(self.render.width.to_string()),
            "height" => Some(self.render.height.to_string()),
            "dpi" => Some(self.render.dpi.to_string()),
            "title" => Some(self.render.title.clone()),
            "legend" => Some(self.render.legend.to_string()),
            "labels" => Some(self.render.labels.to_string()),
            "edges" => Some(self.render.edges.to_string()),
            "curvature" => Some(self.render.curvature.to_string()),
            "viewer" => Some(self.render.viewer.clone()),
            "iterations" => Some(self.layout.iterations.to_string()),
            "charge" => Some(self.layout.charge.to_string()),
            "spring" => Some(self.layout.spring.to_string()),
            "seed" => Some(
                self.layout
                    .seed
                    .map_or_else(String::new, |seed| seed.to_string()),
            ),
            "output_dir" => Some(self.paths.output_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Values are parsed to the field's type. Setting `seed` to an empty string
    /// clears it. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_value(key, value)?,
            "width" => self.render.width = parse_positive(key, value)?,
            "height" => self.render.height = parse_positive(key, value)?,
            "dpi" => {
                let dpi: u32 = parse_value(key, value)?;
                if dpi == 0 {
                    return Err("'dpi' must be greater than zero".to_string());
                }
                self.render.dpi = dpi;
            }
            "title" => self.render.title = value.to_string(),
            "legend" => self.render.legend = parse_value(key, value)?,
            "labels" => self.render.labels = parse_value(key, value)?,
            "edges" => self.render.edges = parse_value(key, value)?,
            "curvature" => {
                let curvature: f32 = parse_value(key, value)?;
                if !curvature.is_finite() {
                    return Err(format!("'{key}' must be a finite number, got '{value}'"));
                }
                self.render.curvature = curvature;
            }
            "viewer" => self.render.viewer = value.to_string(),
            "iterations" => self.layout.iterations = parse_value(key, value)?,
            "charge" => self.layout.charge = parse_positive(key, value)?,
            "spring" => self.layout.spring = parse_positive(key, value)?,
            "seed" => {
                self.layout.seed = if value.trim().is_empty() {
                    None
                } else {
                    Some(parse_value(key, value)?)
                };
            }
            "output_dir" => self.paths.output_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to the value in `defaults`)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "width" => self.render.width = defaults.render.width,
            "height" => self.render.height = defaults.render.height,
            "dpi" => self.render.dpi = defaults.render.dpi,
            "title" => self.render.title.clone_from(&defaults.render.title),
            "legend" => self.render.legend = defaults.render.legend,
            "labels" => self.render.labels = defaults.render.labels,
            "edges" => self.render.edges = defaults.render.edges,
            "curvature" => self.render.curvature = defaults.render.curvature,
            "viewer" => self.render.viewer.clone_from(&defaults.render.viewer),
            "iterations" => self.layout.iterations = defaults.layout.iterations,
            "charge" => self.layout.charge = defaults.layout.charge,
            "spring" => self.layout.spring = defaults.layout.spring,
            "seed" => self.layout.seed = defaults.layout.seed,
            "output_dir" => self.paths.output_dir.clone_from(&defaults.paths.output_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Resolve an output path: relative paths land under `paths.output_dir` when it is set
    #[must_use]
    pub fn resolve_output_path(&self, path: &Path) -> PathBuf {
        if path.is_relative() && !self.paths.output_dir.is_empty() {
            PathBuf::from(&self.paths.output_dir).join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// Succeeds without doing anything when the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("Invalid value for '{key}': '{value}'"))
}

fn parse_positive(key: &str, value: &str) -> Result<f32, String> {
    let parsed: f32 = parse_value(key, value)?;
    if parsed.is_finite() && parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(format!("'{key}' must be a positive number, got '{value}'"))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[render]")?;
        writeln!(f, "  width = {}", self.render.width)?;
        writeln!(f, "  height = {}", self.render.height)?;
        writeln!(f, "  dpi = {}", self.render.dpi)?;
        writeln!(f, "  title = \"{}\"", self.render.title)?;
        writeln!(f, "  legend = {}", self.render.legend)?;
        writeln!(f, "  labels = {}", self.render.labels)?;
        writeln!(f, "  edges = {}", self.render.edges)?;
        writeln!(f, "  curvature = {}", self.render.curvature)?;
        writeln!(f, "  viewer = \"{}\"", self.render.viewer)?;

        writeln!(f, "\n[layout]")?;
        writeln!(f, "  iterations = {}", self.layout.iterations)?;
        writeln!(f, "  charge = {}", self.layout.charge)?;
        writeln!(f, "  spring = {}", self.layout.spring)?;
        match self.layout.seed {
            Some(seed) => writeln!(f, "  seed = {seed}")?,
            None => writeln!(f, "  seed = (random)")?,
        }

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  output_dir = \"{}\"", self.paths.output_dir)?;

        Ok(())
    }
}
