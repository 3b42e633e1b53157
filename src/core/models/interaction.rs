//! Interaction (directed edge) model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an interaction's effect on absorption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Source enhances the target's absorption/bioavailability
    #[serde(alias = "boosts", alias = "enhances")]
    Synergistic,
    /// Source inhibits the target's absorption
    #[serde(alias = "inhibits")]
    Antagonistic,
}

impl Polarity {
    /// Short symbol used as the default edge label
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Synergistic => "+",
            Self::Antagonistic => "\u{2212}",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synergistic => write!(f, "synergistic"),
            Self::Antagonistic => write!(f, "antagonistic"),
        }
    }
}

/// Qualitative impact of an interaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    /// Minor effect
    Low,
    /// Moderate effect
    #[default]
    Medium,
    /// Major effect
    High,
}

impl Strength {
    /// Strongest first, the order used by the legend
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Legend text
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Impact",
            Self::Medium => "Medium Impact",
            Self::High => "High Impact",
        }
    }

    /// Stroke width in points
    #[must_use]
    pub const fn stroke_width(self) -> f64 {
        match self {
            Self::Low => 1.2,
            Self::Medium => 1.8,
            Self::High => 2.5,
        }
    }

    /// Stroke opacity
    #[must_use]
    pub const fn opacity(self) -> f64 {
        match self {
            Self::Low => 0.5,
            Self::Medium => 0.7,
            Self::High => 0.9,
        }
    }
}

/// A directed interaction between two nutrients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Nutrient acting on the target
    pub source: String,

    /// Nutrient being affected
    pub target: String,

    /// Synergistic or antagonistic
    pub polarity: Polarity,

    /// Impact of the interaction
    #[serde(default)]
    pub strength: Strength,

    /// Short description of the mechanism
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Interaction {
    /// Create an interaction with medium strength and no label
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>, polarity: Polarity) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            polarity,
            strength: Strength::default(),
            label: None,
        }
    }

    /// Set the interaction strength
    #[must_use]
    pub const fn with_strength(mut self, strength: Strength) -> Self {
        self.strength = strength;
        self
    }

    /// Set the mechanism label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Text drawn at the edge midpoint: the mechanism label or the polarity symbol
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| self.polarity.symbol())
    }
}
