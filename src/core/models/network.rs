//! Validated nutrient interaction network

use super::{Group, Interaction, Nutrient};
use crate::core::error::{NutrinetError, Result};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Fill color for nutrients without a group
pub const DEFAULT_NODE_COLOR: &str = "#1f77b4";

/// Nutrients, their groups and the directed interactions between them.
///
/// Construction checks that every interaction endpoint and every group
/// reference resolves, names are unique and no nutrient interacts with itself.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nutrients: Vec<Nutrient>,
    groups: Vec<Group>,
    interactions: Vec<Interaction>,
    /// Nutrient name -> index into `nutrients`
    index: HashMap<String, usize>,
}

impl Network {
    /// Build and validate a network
    ///
    /// # Errors
    /// Returns `InvalidDataset` naming the first offending entry
    pub fn new(
        nutrients: Vec<Nutrient>,
        groups: Vec<Group>,
        interactions: Vec<Interaction>,
    ) -> Result<Self> {
        let mut group_names = HashSet::new();
        for group in &groups {
            if !group_names.insert(group.name.as_str()) {
                return Err(NutrinetError::InvalidDataset(format!(
                    "duplicate group '{}'",
                    group.name
                )));
            }
        }

        let mut index = HashMap::with_capacity(nutrients.len());
        for (i, nutrient) in nutrients.iter().enumerate() {
            if nutrient.name.trim().is_empty() {
                return Err(NutrinetError::InvalidDataset(
                    "nutrient with an empty name".to_string(),
                ));
            }
            if index.insert(nutrient.name.clone(), i).is_some() {
                return Err(NutrinetError::InvalidDataset(format!(
                    "nutrient '{}' is declared more than once",
                    nutrient.name
                )));
            }
            if let Some(group) = &nutrient.group {
                if !group_names.contains(group.as_str()) {
                    return Err(NutrinetError::InvalidDataset(format!(
                        "nutrient '{}' references unknown group '{group}'",
                        nutrient.name
                    )));
                }
            }
        }

        for interaction in &interactions {
            for endpoint in [&interaction.source, &interaction.target] {
                if !index.contains_key(endpoint) {
                    return Err(NutrinetError::InvalidDataset(format!(
                        "interaction {} -> {} references unknown nutrient '{endpoint}'",
                        interaction.source, interaction.target
                    )));
                }
            }
            if interaction.source == interaction.target {
                return Err(NutrinetError::InvalidDataset(format!(
                    "nutrient '{}' cannot interact with itself",
                    interaction.source
                )));
            }
        }

        Ok(Self {
            nutrients,
            groups,
            interactions,
            index,
        })
    }

    /// All nutrients in declaration order
    #[must_use]
    pub fn nutrients(&self) -> &[Nutrient] {
        &self.nutrients
    }

    /// All groups in declaration order
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// All interactions in declaration order
    #[must_use]
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Number of nutrients
    #[must_use]
    pub fn nutrient_count(&self) -> usize {
        self.nutrients.len()
    }

    /// Number of interactions
    #[must_use]
    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }

    /// True when there is nothing to draw
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nutrients.is_empty()
    }

    /// Position of a nutrient in declaration order
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Indices of an interaction's source and target
    ///
    /// Always `Some` for interactions owned by this network.
    #[must_use]
    pub fn endpoints(&self, interaction: &Interaction) -> Option<(usize, usize)> {
        Some((
            self.index_of(&interaction.source)?,
            self.index_of(&interaction.target)?,
        ))
    }

    /// Fill color for a nutrient: its group's color, or the default
    #[must_use]
    pub fn color_of(&self, nutrient: &Nutrient) -> &str {
        nutrient
            .group
            .as_deref()
            .and_then(|name| self.groups.iter().find(|g| g.name == name))
            .map_or(DEFAULT_NODE_COLOR, |g| g.color.as_str())
    }

    /// Total degree (incoming + outgoing interactions) of a nutrient
    #[must_use]
    pub fn degree(&self, name: &str) -> usize {
        self.interactions
            .iter()
            .filter(|i| i.source == name || i.target == name)
            .count()
    }

    /// Number of nutrients in a group
    #[must_use]
    pub fn group_size(&self, group: &str) -> usize {
        self.nutrients
            .iter()
            .filter(|n| n.group.as_deref() == Some(group))
            .count()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Interaction network: {} nutrients, {} interactions",
            self.nutrient_count(),
            self.interaction_count()
        )?;
        for interaction in &self.interactions {
            writeln!(
                f,
                "  {} → {} ({}, {:?})",
                interaction.source, interaction.target, interaction.polarity, interaction.strength
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Polarity;

    fn nutrients() -> Vec<Nutrient> {
        vec![
            Nutrient::new("Calcium (Ca)").in_group("Bone"),
            Nutrient::new("Iron (Fe)"),
            Nutrient::new("Magnesium (Mg)").in_group("Bone"),
        ]
    }

    fn groups() -> Vec<Group> {
        vec![Group::new("Bone", "#4ECDC4")]
    }

    #[test]
    fn test_valid_network() {
        let network = Network::new(
            nutrients(),
            groups(),
            vec![
                Interaction::new("Calcium (Ca)", "Iron (Fe)", Polarity::Antagonistic),
                Interaction::new("Magnesium (Mg)", "Calcium (Ca)", Polarity::Synergistic),
                Interaction::new("Calcium (Ca)", "Magnesium (Mg)", Polarity::Antagonistic),
            ],
        )
        .unwrap();

        assert_eq!(network.nutrient_count(), 3);
        assert_eq!(network.interaction_count(), 3);
        assert_eq!(network.index_of("Iron (Fe)"), Some(1));
        assert_eq!(network.degree("Calcium (Ca)"), 3);
        assert_eq!(network.group_size("Bone"), 2);
        assert_eq!(network.color_of(&network.nutrients()[0]), "#4ECDC4");
        assert_eq!(network.color_of(&network.nutrients()[1]), DEFAULT_NODE_COLOR);
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let err = Network::new(
            nutrients(),
            groups(),
            vec![Interaction::new("Calcium (Ca)", "Zinc (Zn)", Polarity::Antagonistic)],
        )
        .unwrap_err();
        assert!(err.to_string().contains("Zinc (Zn)"));
    }

    #[test]
    fn test_self_interaction_rejected() {
        let result = Network::new(
            nutrients(),
            groups(),
            vec![Interaction::new("Iron (Fe)", "Iron (Fe)", Polarity::Synergistic)],
        );
        assert!(matches!(result, Err(NutrinetError::InvalidDataset(_))));
    }

    #[test]
    fn test_duplicate_nutrient_rejected() {
        let mut list = nutrients();
        list.push(Nutrient::new("Iron (Fe)"));
        assert!(Network::new(list, groups(), Vec::new()).is_err());
    }

    #[test]
    fn test_unknown_group_rejected() {
        let list = vec![Nutrient::new("Iodine (I)").in_group("Thyroid")];
        assert!(Network::new(list, groups(), Vec::new()).is_err());
    }

    #[test]
    fn test_empty_network() {
        let network = Network::new(Vec::new(), Vec::new(), Vec::new()).unwrap();
        assert!(network.is_empty());
        assert_eq!(network.interaction_count(), 0);
    }
}
