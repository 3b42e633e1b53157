//! Render command handler
//!
//! Loads the dataset, lays it out, draws the figure and either saves it or
//! shows it in a viewer.

use nutrinet::config::Config;
use nutrinet::core::{
    dataset::load_network,
    layout::{ForceLayout, LayoutParams},
    render::{save_figure, FigureBuilder, RenderOptions, Viewer},
    Result,
};
use nutrinet::{info, verbose, warn};
use std::path::Path;

/// Run the render command.
///
/// # Arguments
/// * `dataset` - Optional dataset file (built-in dataset when `None`)
/// * `save` - Optional output path; the figure is shown in a viewer when `None`
/// * `config` - Configuration with CLI overrides already applied
///
/// # Errors
/// Propagates dataset, rendering, filesystem and viewer errors
pub fn run(dataset: Option<&Path>, save: Option<&Path>, config: &Config) -> Result<()> {
    let network = load_network(dataset)?;
    info!(
        "Loaded {} nutrients and {} interactions from {}",
        network.nutrient_count(),
        network.interaction_count(),
        dataset.map_or_else(|| "built-in dataset".to_string(), |p| p.display().to_string())
    );
    verbose!("{network}");
    if network.is_empty() {
        warn!("Dataset has no nutrients; drawing an empty figure");
    }

    let layout = ForceLayout::new(LayoutParams::from_config(&config.layout)).compute(&network);
    let options = RenderOptions::from_config(&config.render);
    let figure = FigureBuilder::new(&options).build(&network, &layout);

    if let Some(path) = save {
        let path = config.resolve_output_path(path);
        let format = save_figure(&figure, &path)?;
        println!("✓ Saved {format} figure: {}", path.display());
    } else {
        Viewer::from_config(&config.render).show(&figure)?;
    }
    Ok(())
}
