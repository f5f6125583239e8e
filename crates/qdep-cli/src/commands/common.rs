//! Shared helpers for CLI commands.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use qdep_dataset::DatasetConfig;
use qdep_formats::{parse_attributes, parse_ops};
use qdep_ir::{Gate, two_qubit_gates};

/// Gates read from a circuit file, with the size of the source.
#[derive(Debug)]
pub struct LoadedCircuit {
    /// Two-qubit gates, densely indexed.
    pub gates: Vec<Gate>,
    /// Entries in the source file before filtering.
    pub num_ops: usize,
}

impl LoadedCircuit {
    /// Distinct qubits touched by the gates.
    pub fn num_qubits(&self) -> usize {
        self.gates
            .iter()
            .flat_map(|g| [g.control, g.target])
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Load gates from an operation list (JSON array) or an attribute table
/// (JSON object).
pub fn load_circuit(path: &str) -> Result<LoadedCircuit> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    match source.trim_start().chars().next() {
        Some('[') => {
            let ops = parse_ops(&source).with_context(|| format!("Invalid operation list: {path}"))?;
            Ok(LoadedCircuit {
                gates: two_qubit_gates(&ops),
                num_ops: ops.len(),
            })
        }
        Some('{') => {
            let attributes = parse_attributes(&source)
                .with_context(|| format!("Invalid attribute file: {path}"))?;
            let gates = attributes.to_gates()?;
            Ok(LoadedCircuit {
                num_ops: gates.len(),
                gates,
            })
        }
        _ => anyhow::bail!("Expected a JSON array or object in {path}"),
    }
}

/// Circuit name from an explicit value or the input file stem.
///
/// A trailing `_attr` is dropped so `ghz_attr.json` names `ghz`.
pub fn circuit_name(input: &str, name: Option<&str>) -> Result<String> {
    if let Some(name) = name {
        return Ok(name.to_string());
    }
    let stem = Path::new(input)
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow::anyhow!("Cannot derive a circuit name from '{input}'"))?;
    Ok(stem.strip_suffix("_attr").unwrap_or(stem).to_string())
}

/// Load configuration, then apply command-line overrides.
pub fn load_config(
    config: Option<&str>,
    max_window: Option<usize>,
    replicas: Option<usize>,
    pretty: bool,
) -> Result<DatasetConfig> {
    let mut config = DatasetConfig::load(config.map(Path::new))?;
    if let Some(w) = max_window {
        config.max_window = w;
    }
    if let Some(r) = replicas {
        config.replicas = r;
    }
    config.pretty |= pretty;
    config.validate()?;
    Ok(config)
}

/// Create a progress bar for sample generation.
pub fn create_progress_bar(len: u64, message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    Ok(pb)
}
