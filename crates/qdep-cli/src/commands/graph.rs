//! Graph command implementation.

use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};

use qdep_dataset::{attributes_file_name, edges_file_name};
use qdep_formats::{NodeAttributes, write_attributes, write_edges};
use qdep_ir::DependencyGraphBuilder;

use super::common::{circuit_name, load_circuit};

/// Execute the graph command.
pub fn execute(
    input: &str,
    name: Option<&str>,
    edges: Option<&str>,
    attributes: Option<&str>,
) -> Result<()> {
    println!(
        "{} Building dependency graph for {}",
        style("→").cyan().bold(),
        style(input).green()
    );

    let circuit = load_circuit(input)?;
    println!(
        "  Loaded: {} qubits, {} two-qubit gates ({} entries)",
        circuit.num_qubits(),
        circuit.gates.len(),
        circuit.num_ops
    );

    let graph = DependencyGraphBuilder::new().build_checked(&circuit.gates)?;
    graph
        .verify_integrity()
        .context("Dependency graph failed its integrity check")?;

    let name = circuit_name(input, name)?;
    let dir = Path::new(input).parent().unwrap_or_else(|| Path::new(""));
    let edges_path = output_path(edges, dir, &edges_file_name(&name));
    let attributes_path = output_path(attributes, dir, &attributes_file_name(&name));

    write_edges(&edges_path, &graph.to_edge_list())?;
    write_attributes(&attributes_path, &NodeAttributes::from_gates(&circuit.gates))?;

    println!(
        "{} {} gates, {} edges",
        style("✓").green().bold(),
        graph.num_gates(),
        graph.num_edges()
    );
    println!("  Edges:      {}", style(edges_path.display()).green());
    println!("  Attributes: {}", style(attributes_path.display()).green());

    Ok(())
}

fn output_path(explicit: Option<&str>, dir: &Path, default_name: &str) -> PathBuf {
    explicit.map_or_else(|| dir.join(default_name), PathBuf::from)
}
