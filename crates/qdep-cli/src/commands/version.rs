//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - dependency graphs and edge-window datasets for quantum circuits",
        style("qdep").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qdep-ir       Gate model and dependency graphs");
    println!("  qdep-formats  Edge-list and node-attribute files");
    println!("  qdep-dataset  Edge-window augmentation datasets");
    println!("  qdep-cli      Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
