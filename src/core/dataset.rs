//! Dataset loading
//!
//! A dataset is TOML authored by hand: functional groups (optionally listing
//! their member nutrients), standalone nutrients, and directed interactions.
//! The curated micronutrient dataset is compiled into the binary.

use crate::core::error::{NutrinetError, Result};
use crate::core::models::{nutrient::is_hex_color, Group, Interaction, Network, Nutrient};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Built-in micronutrient interaction dataset
const BUILTIN_DATASET: &str = include_str!("../../assets/micronutrients.toml");

/// Colors assigned, in order, to groups that don't specify one
const PALETTE: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// A `[[groups]]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupEntry {
    /// Group name
    pub name: String,
    /// Optional hex color; a palette color is used when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Nutrients declared as members of this group
    #[serde(default)]
    pub members: Vec<String>,
}

/// Raw dataset as written in TOML, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Functional groups
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
    /// Nutrients not declared through a group's `members`
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
    /// Directed interactions
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

impl Dataset {
    /// The compiled-in micronutrient dataset
    ///
    /// # Panics
    /// Panics if the embedded dataset is not valid TOML.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml(BUILTIN_DATASET).expect("Failed to parse compiled-in dataset")
    }

    /// Parse a dataset from a TOML string
    ///
    /// # Errors
    /// Returns `DatasetParse` if the TOML doesn't match the dataset schema
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Read and parse a dataset file
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read, `DatasetParse` if it is malformed
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| NutrinetError::io(path, e))?;
        Self::from_toml(&content)
    }

    /// Resolve group colors and member lists, then validate into a [`Network`]
    ///
    /// Group members come first (in group order), followed by standalone nutrients.
    ///
    /// # Errors
    /// Returns `InvalidDataset` for bad colors, dangling references, duplicates
    /// or self-interactions
    pub fn into_network(self) -> Result<Network> {
        let mut groups = Vec::with_capacity(self.groups.len());
        let mut nutrients = Vec::new();
        let mut palette = PALETTE.iter().cycle();

        for entry in self.groups {
            let color = match entry.color {
                Some(color) if is_hex_color(&color) => color,
                Some(color) => {
                    return Err(NutrinetError::InvalidDataset(format!(
                        "group '{}' has invalid color '{color}'",
                        entry.name
                    )))
                }
                None => palette.next().map_or_else(String::new, |c| (*c).to_string()),
            };
            nutrients.extend(
                entry
                    .members
                    .into_iter()
                    .map(|member| Nutrient::new(member).in_group(entry.name.clone())),
            );
            groups.push(Group::new(entry.name, color));
        }

        nutrients.extend(self.nutrients);

        Network::new(nutrients, groups, self.interactions)
    }
}

/// Load the dataset at `path`, or the built-in one, as a validated network
///
/// # Errors
/// Propagates loading and validation errors
pub fn load_network(path: Option<&Path>) -> Result<Network> {
    let dataset = match path {
        Some(path) => Dataset::load(path)?,
        None => Dataset::builtin(),
    };
    dataset.into_network()
}
