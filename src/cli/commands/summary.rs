//! Summary command handler

use nutrinet::core::{analysis::NetworkSummary, dataset::load_network, Result};
use std::path::Path;

/// Print summary statistics for the dataset
///
/// # Errors
/// Propagates dataset loading and validation errors
pub fn run(dataset: Option<&Path>) -> Result<()> {
    let network = load_network(dataset)?;
    let summary = NetworkSummary::from(&network);

    let source = dataset.map_or_else(
        || "built-in dataset".to_string(),
        |p| p.display().to_string(),
    );
    println!("\n=== Interaction network ({source}) ===\n");
    print!("{summary}");
    Ok(())
}
