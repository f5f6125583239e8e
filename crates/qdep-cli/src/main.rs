//! qdep Command-Line Interface
//!
//! The main entry point for the qdep CLI tool.
//!
//! ```text
//!   ops.json ──graph──► <name>_dependency.edges + <name>_attr.json
//!                               │
//!                              plan  (sizes only)
//!                               │
//!                             build ──► processed/<name>_<p>.json
//!                               │
//!                              get
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;

mod commands;
mod logging;

use commands::{build, get, graph, plan, version};
use logging::LogFormat;

/// qdep - dependency graphs and edge-window datasets for quantum circuits
#[derive(Parser)]
#[command(name = "qdep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value = "console", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dependency graph of a circuit
    Graph {
        /// Operation list or node-attribute file (JSON)
        #[arg(short, long)]
        input: String,

        /// Circuit name (defaults to the input file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Edge-list output path
        #[arg(long)]
        edges: Option<String>,

        /// Node-attribute output path
        #[arg(long)]
        attributes: Option<String>,
    },

    /// Show the size and layout of a dataset without building it
    Plan {
        /// Edge-list file
        #[arg(short, long)]
        edges: String,

        /// Largest removed window
        #[arg(short = 'w', long)]
        max_window: Option<usize>,

        /// Copies per variant
        #[arg(short, long)]
        replicas: Option<usize>,

        /// Configuration file (YAML)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Materialise every sample of a dataset
    Build {
        /// Dataset root (holds raw/ and processed/)
        #[arg(short, long)]
        root: String,

        /// Circuit name
        #[arg(short, long)]
        name: String,

        /// Configuration file (YAML)
        #[arg(short, long)]
        config: Option<String>,

        /// Largest removed window
        #[arg(short = 'w', long)]
        max_window: Option<usize>,

        /// Copies per variant
        #[arg(long)]
        replicas: Option<usize>,

        /// Pretty-print sample files
        #[arg(long)]
        pretty: bool,
    },

    /// Print one sample as JSON
    Get {
        /// Dataset root (holds raw/ and processed/)
        #[arg(short, long)]
        root: String,

        /// Circuit name
        #[arg(short, long)]
        name: String,

        /// Sample position
        #[arg(short, long)]
        index: usize,

        /// Configuration file (YAML)
        #[arg(short, long)]
        config: Option<String>,

        /// Compute the sample instead of reading it from processed/
        #[arg(long)]
        compute: bool,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_format);

    // Execute command
    let result = match cli.command {
        Commands::Graph {
            input,
            name,
            edges,
            attributes,
        } => graph::execute(&input, name.as_deref(), edges.as_deref(), attributes.as_deref()),

        Commands::Plan {
            edges,
            max_window,
            replicas,
            config,
        } => plan::execute(&edges, max_window, replicas, config.as_deref()),

        Commands::Build {
            root,
            name,
            config,
            max_window,
            replicas,
            pretty,
        } => build::execute(
            &root,
            &name,
            config.as_deref(),
            max_window,
            replicas,
            pretty,
        ),

        Commands::Get {
            root,
            name,
            index,
            config,
            compute,
        } => get::execute(&root, &name, index, config.as_deref(), compute),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
