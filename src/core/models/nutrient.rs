//! Nutrient and functional group models

use serde::{Deserialize, Serialize};

/// A dietary mineral or trace element (graph node)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrient {
    /// Unique display name (e.g., "Calcium (Ca)")
    pub name: String,

    /// Functional group used for coloring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Nutrient {
    /// Create a nutrient without a group
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: None,
        }
    }

    /// Assign the nutrient to a functional group
    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// A functional group of nutrients (e.g., "Bone Health & Structure")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group name shown in the legend
    pub name: String,

    /// Fill color as `#rgb` or `#rrggbb`
    pub color: String,
}

impl Group {
    /// Create a group with a resolved color
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Whether `color` is a `#rgb` or `#rrggbb` hex color
#[must_use]
pub fn is_hex_color(color: &str) -> bool {
    color.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}
