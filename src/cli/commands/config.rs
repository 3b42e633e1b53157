//! Config command handler

use crate::args::ConfigSubcommand;
use nutrinet::config::Config;
use nutrinet::info;
use std::io::{self, BufRead, Write};

/// Keys accepted by `config get/set/unset`
const KEYS: &[&str] = &[
    "level",
    "file",
    "verbose",
    "width",
    "height",
    "dpi",
    "title",
    "legend",
    "labels",
    "edges",
    "curvature",
    "viewer",
    "iterations",
    "charge",
    "spring",
    "seed",
    "output_dir",
];

/// Dispatch config subcommands
///
/// # Errors
/// Returns a printable message for unknown keys, invalid values or failed writes
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    match subcommand {
        None => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: None }) => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => {
            let value = config.get(&key).ok_or_else(|| unknown_key(&key))?;
            println!("{value}");
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => {
            config.set(&key, &value)?;
            persist(config)?;
            println!("✓ Set {key} = {value}");
            Ok(())
        }
        Some(ConfigSubcommand::Unset { key }) => {
            config.unset(&key, defaults).map_err(|_| unknown_key(&key))?;
            persist(config)?;
            println!("✓ Reset {key} to default");
            Ok(())
        }
        Some(ConfigSubcommand::Reset) => reset(&mut io::stdin().lock()),
    }
}

fn show_all(config: &Config) {
    println!("\n=== Configuration ({}) ===\n", Config::get_config_file_path().display());
    print!("{config}");
}

fn unknown_key(key: &str) -> String {
    format!("Unknown config key: '{key}'. Valid keys: {}", KEYS.join(", "))
}

fn persist(config: &Config) -> Result<(), String> {
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    info!("Config saved to {}", Config::get_config_file_path().display());
    Ok(())
}

/// True when the answer read from `input` is yes
fn confirm(prompt: &str, input: &mut impl BufRead) -> bool {
    print!("{prompt} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    if input.read_line(&mut response).is_err() {
        return false;
    }
    matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn reset(input: &mut impl BufRead) -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    if confirm("Are you sure you want to reset config to defaults?", input) {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_is_readable() {
        let config = Config::from_defaults();
        for key in KEYS {
            assert!(config.get(key).is_some(), "key '{key}' not readable");
        }
    }

    #[test]
    fn test_confirm_answers() {
        assert!(confirm("?", &mut "y\n".as_bytes()));
        assert!(confirm("?", &mut "YES\n".as_bytes()));
        assert!(!confirm("?", &mut "n\n".as_bytes()));
        assert!(!confirm("?", &mut "".as_bytes()));
    }

    #[test]
    fn test_unknown_key_lists_valid_keys() {
        let message = unknown_key("colour");
        assert!(message.contains("'colour'"));
        assert!(message.contains("output_dir"));
    }
}
