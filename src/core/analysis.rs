//! Network summary statistics

use crate::core::models::{Network, Polarity};
use std::fmt;

/// How many nutrients the summary lists as most connected
const TOP_CONNECTED: usize = 5;

/// Summary statistics for an interaction network
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSummary {
    /// Number of nutrients
    pub nutrients: usize,
    /// Number of interactions
    pub interactions: usize,
    /// Interactions that enhance absorption
    pub synergistic: usize,
    /// Interactions that inhibit absorption
    pub antagonistic: usize,
    /// Edges over possible directed edges, `E / (N (N - 1))`
    pub density: f64,
    /// Mean total degree, `2E / N`
    pub average_degree: f64,
    /// Most connected nutrients with their degree, highest first
    pub most_connected: Vec<(String, usize)>,
    /// Nutrient count per group, in declaration order
    pub group_sizes: Vec<(String, usize)>,
}

impl NetworkSummary {
    /// Compute the summary of a network
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_network(network: &Network) -> Self {
        let nutrients = network.nutrient_count();
        let interactions = network.interaction_count();
        let synergistic = network
            .interactions()
            .iter()
            .filter(|i| i.polarity == Polarity::Synergistic)
            .count();

        let density = if nutrients > 1 {
            interactions as f64 / (nutrients * (nutrients - 1)) as f64
        } else {
            0.0
        };
        let average_degree = if nutrients > 0 {
            2.0 * interactions as f64 / nutrients as f64
        } else {
            0.0
        };

        let mut degrees: Vec<(String, usize)> = network
            .nutrients()
            .iter()
            .map(|n| (n.name.clone(), network.degree(&n.name)))
            .collect();
        // Stable sort keeps declaration order among ties
        degrees.sort_by(|a, b| b.1.cmp(&a.1));
        degrees.truncate(TOP_CONNECTED);

        let group_sizes = network
            .groups()
            .iter()
            .map(|g| (g.name.clone(), network.group_size(&g.name)))
            .collect();

        Self {
            nutrients,
            interactions,
            synergistic,
            antagonistic: interactions - synergistic,
            density,
            average_degree,
            most_connected: degrees,
            group_sizes,
        }
    }
}

impl From<&Network> for NetworkSummary {
    fn from(network: &Network) -> Self {
        Self::from_network(network)
    }
}

impl fmt::Display for NetworkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nutrients:        {}", self.nutrients)?;
        writeln!(f, "Interactions:     {}", self.interactions)?;
        writeln!(f, "  synergistic:    {}", self.synergistic)?;
        writeln!(f, "  antagonistic:   {}", self.antagonistic)?;
        writeln!(f, "Density:          {:.3}", self.density)?;
        writeln!(f, "Average degree:   {:.2}", self.average_degree)?;

        if !self.most_connected.is_empty() {
            writeln!(f, "\nMost connected:")?;
            for (name, degree) in &self.most_connected {
                writeln!(f, "  {name:<24} {degree}")?;
            }
        }

        if !self.group_sizes.is_empty() {
            writeln!(f, "\nGroups:")?;
            for (name, size) in &self.group_sizes {
                writeln!(f, "  {name:<36} {size}")?;
            }
        }
        Ok(())
    }
}
