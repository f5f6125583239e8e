//! Get command implementation.

use anyhow::{Context, Result};

use qdep_dataset::CircuitDataset;

use super::common::load_config;

/// Execute the get command.
pub fn execute(
    root: &str,
    name: &str,
    index: usize,
    config: Option<&str>,
    compute: bool,
) -> Result<()> {
    let config = load_config(config, None, None, false)?;
    let dataset = CircuitDataset::open(root, name, &config)
        .with_context(|| format!("Failed to open dataset '{name}' in {root}"))?;

    let sample = if compute {
        dataset.sample_at(index)?
    } else {
        dataset
            .get(index)
            .with_context(|| format!("Sample {index} is not stored; run `qdep build` first"))?
    };

    println!("{}", serde_json::to_string_pretty(&sample)?);
    Ok(())
}
