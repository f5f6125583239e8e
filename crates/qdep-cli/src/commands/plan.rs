//! Plan command implementation.

use anyhow::Result;
use console::style;
use std::path::Path;

use qdep_dataset::{DatasetPlan, windows_of_size};
use qdep_formats::read_edges;

use super::common::load_config;

/// Execute the plan command.
pub fn execute(
    edges: &str,
    max_window: Option<usize>,
    replicas: Option<usize>,
    config: Option<&str>,
) -> Result<()> {
    let config = load_config(config, max_window, replicas, false)?;
    let base = read_edges(Path::new(edges))?;

    // Gate count does not affect sizing; only edges are known here.
    let num_gates = base
        .iter()
        .map(|e| e.source.max(e.destination) + 1)
        .max()
        .unwrap_or(0);
    let plan = DatasetPlan::new(num_gates, base.len(), config.max_window, config.replicas)?;

    println!(
        "{} Dataset plan for {}",
        style("→").cyan().bold(),
        style(edges).green()
    );
    println!("  Base edges:   {}", plan.num_edges());
    println!("  Max window:   {}", plan.max_window());
    println!("  Replicas:     {}", plan.replicas());
    println!();
    println!("  {:>8}  {:>8}  {:>12}", "window", "variants", "labels");
    println!("  {:>8}  {:>8}  {:>12}", "full", 1, "0");

    for window in 1..=plan.max_window() {
        let count = windows_of_size(plan.num_edges(), window);
        let Some(first) = plan.first_label_of_window(window) else {
            break;
        };
        println!(
            "  {:>8}  {:>8}  {:>12}",
            window,
            count,
            format!("{}..={}", first, first + count - 1)
        );
    }

    println!();
    println!(
        "{} {} variants, {} samples",
        style("✓").green().bold(),
        style(plan.num_variants()).yellow(),
        style(plan.len()).yellow()
    );

    Ok(())
}
