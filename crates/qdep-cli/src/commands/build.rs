//! Build command implementation.

use anyhow::{Context, Result};
use console::style;

use qdep_dataset::CircuitDataset;

use super::common::{create_progress_bar, load_config};

/// Execute the build command.
pub fn execute(
    root: &str,
    name: &str,
    config: Option<&str>,
    max_window: Option<usize>,
    replicas: Option<usize>,
    pretty: bool,
) -> Result<()> {
    let config = load_config(config, max_window, replicas, pretty)?;

    println!(
        "{} Building dataset {} in {}",
        style("→").cyan().bold(),
        style(name).green(),
        style(root).green()
    );

    let mut dataset = CircuitDataset::open(root, name, &config)
        .with_context(|| format!("Failed to open dataset '{name}' in {root}"))?;
    println!(
        "  {} gates, {} edges, {} variants x {} replicas",
        dataset.plan().num_gates(),
        dataset.plan().num_edges(),
        dataset.plan().num_variants(),
        dataset.plan().replicas()
    );

    let pb = create_progress_bar(dataset.len() as u64, "samples")?;
    let report = dataset.process_with_progress(|_| pb.inc(1))?;
    pb.finish_and_clear();

    println!(
        "{} {} samples ({} written, {} already present)",
        style("✓").green().bold(),
        report.total(),
        style(report.written).yellow(),
        report.skipped
    );

    Ok(())
}
