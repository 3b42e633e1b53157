//! Integration tests for the dataset → layout → figure pipeline

use nutrinet::config::Config;
use nutrinet::core::dataset::{load_network, Dataset};
use nutrinet::core::layout::{ForceLayout, LayoutParams};
use nutrinet::core::models::{Network, Polarity};
use nutrinet::core::render::{Figure, FigureBuilder, LineStyle, RenderOptions};
use nutrinet::core::NutrinetError;
use std::fs;

fn figure(network: &Network, options: &RenderOptions, seed: u64) -> Figure {
    let layout = ForceLayout::new(LayoutParams::default().with_seed(seed)).compute(network);
    FigureBuilder::new(options).build(network, &layout)
}

#[test]
fn one_mark_per_nutrient_and_interaction() {
    let network = load_network(None).unwrap();
    let figure = figure(&network, &RenderOptions::default(), 1);

    assert_eq!(figure.nodes.len(), network.nutrient_count());
    assert_eq!(figure.edges.len(), network.interaction_count());
    for (node, nutrient) in figure.nodes.iter().zip(network.nutrients()) {
        assert_eq!(node.name, nutrient.name);
        assert_eq!(node.fill, network.color_of(nutrient));
    }
}

#[test]
fn line_style_follows_polarity() {
    let network = load_network(None).unwrap();
    let figure = figure(&network, &RenderOptions::default(), 2);

    for edge in &figure.edges {
        let expected = match edge.polarity {
            Polarity::Synergistic => LineStyle::Solid,
            Polarity::Antagonistic => LineStyle::Dashed,
        };
        assert_eq!(edge.style, expected, "{} -> {}", edge.source, edge.target);
    }
}

#[test]
fn same_seed_same_positions() {
    let network = load_network(None).unwrap();
    let a = figure(&network, &RenderOptions::default(), 42);
    let b = figure(&network, &RenderOptions::default(), 42);

    for (x, y) in a.nodes.iter().zip(&b.nodes) {
        assert!(x.center.distance(y.center) < 1e-6);
    }
}

#[test]
fn counts_and_styles_do_not_depend_on_seed() {
    let network = load_network(None).unwrap();
    let a = figure(&network, &RenderOptions::default(), 1);
    let b = figure(&network, &RenderOptions::default(), 99);

    assert_eq!(a.nodes.len(), b.nodes.len());
    assert_eq!(a.edges.len(), b.edges.len());
    let styles = |f: &Figure| f.edges.iter().map(|e| e.style).collect::<Vec<_>>();
    assert_eq!(styles(&a), styles(&b));
}

#[test]
fn opposite_directions_bend_apart() {
    let dataset = Dataset::from_toml(
        r#"
[[nutrients]]
name = "Zinc (Zn)"

[[nutrients]]
name = "Copper (Cu)"

[[interactions]]
source = "Zinc (Zn)"
target = "Copper (Cu)"
polarity = "inhibits"

[[interactions]]
source = "Copper (Cu)"
target = "Zinc (Zn)"
polarity = "inhibits"
"#,
    )
    .unwrap();
    let network = dataset.into_network().unwrap();
    let figure = figure(&network, &RenderOptions::default(), 3);

    let first = figure.edges[0].arrow.control;
    let second = figure.edges[1].arrow.control;
    assert!(first.distance(second) > 1.0);
}

#[test]
fn toggles_from_config_overrides() {
    let network = load_network(None).unwrap();
    let mut config = Config::from_defaults();
    config.set("legend", "false").unwrap();
    config.set("labels", "false").unwrap();
    let figure = figure(&network, &RenderOptions::from_config(&config.render), 4);

    assert!(figure.legend.is_none());
    assert_eq!(figure.label_count(), 0);
    assert_eq!(figure.edges.len(), network.interaction_count());

    config.set("edges", "false").unwrap();
    let figure = self::figure(&network, &RenderOptions::from_config(&config.render), 4);
    assert!(figure.edges.is_empty());
    assert_eq!(figure.nodes.len(), network.nutrient_count());
}

#[test]
fn empty_dataset_renders_without_error() {
    let network = Dataset::from_toml("").unwrap().into_network().unwrap();
    let figure = figure(&network, &RenderOptions::default(), 5);

    assert!(figure.nodes.is_empty());
    assert!(figure.edges.is_empty());
    let svg = figure.to_svg().unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn dangling_reference_rejected_at_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(
        &path,
        r#"
[[nutrients]]
name = "Iron (Fe)"

[[interactions]]
source = "Iron (Fe)"
target = "Unobtainium (Uo)"
polarity = "inhibits"
"#,
    )
    .unwrap();

    let err = load_network(Some(&path)).unwrap_err();
    assert!(matches!(err, NutrinetError::InvalidDataset(_)));
    assert!(err.to_string().contains("Unobtainium (Uo)"));
}

#[test]
fn missing_dataset_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_network(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, NutrinetError::Io { .. }));
}
