//! CLI command parsing and end-to-end tests.
//!
//! Argument parsing is checked with clap `try_parse_from` on a mirror of the
//! binary's argument structs; the workflow tests drive the built `qdep`
//! binary against a temporary directory.

// ============================================================================
// Clap argument parsing
// ============================================================================

mod clap_parsing {
    use clap::{Parser, Subcommand, ValueEnum};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    enum TestLogFormat {
        Console,
        Json,
    }

    #[derive(Parser)]
    #[command(name = "qdep")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[arg(long, value_enum, default_value = "console", global = true)]
        log_format: TestLogFormat,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Graph {
            #[arg(short, long)]
            input: String,
            #[arg(short, long)]
            name: Option<String>,
            #[arg(long)]
            edges: Option<String>,
            #[arg(long)]
            attributes: Option<String>,
        },
        Plan {
            #[arg(short, long)]
            edges: String,
            #[arg(short = 'w', long)]
            max_window: Option<usize>,
            #[arg(short, long)]
            replicas: Option<usize>,
            #[arg(short, long)]
            config: Option<String>,
        },
        Build {
            #[arg(short, long)]
            root: String,
            #[arg(short, long)]
            name: String,
            #[arg(short, long)]
            config: Option<String>,
            #[arg(short = 'w', long)]
            max_window: Option<usize>,
            #[arg(long)]
            replicas: Option<usize>,
            #[arg(long)]
            pretty: bool,
        },
        Get {
            #[arg(short, long)]
            root: String,
            #[arg(short, long)]
            name: String,
            #[arg(short, long)]
            index: usize,
            #[arg(short, long)]
            config: Option<String>,
            #[arg(long)]
            compute: bool,
        },
        Version,
    }

    #[test]
    fn test_parse_graph_minimal() {
        let cli = TestCli::try_parse_from(["qdep", "graph", "-i", "ghz.json"]).unwrap();
        match cli.command {
            TestCommands::Graph {
                input,
                name,
                edges,
                attributes,
            } => {
                assert_eq!(input, "ghz.json");
                assert!(name.is_none());
                assert!(edges.is_none());
                assert!(attributes.is_none());
            }
            _ => panic!("Expected Graph command"),
        }
    }

    #[test]
    fn test_parse_graph_missing_input() {
        assert!(TestCli::try_parse_from(["qdep", "graph"]).is_err());
    }

    #[test]
    fn test_parse_plan_overrides() {
        let cli = TestCli::try_parse_from([
            "qdep", "plan", "-e", "c.edges", "-w", "3", "--replicas", "4",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Plan {
                edges,
                max_window,
                replicas,
                config,
            } => {
                assert_eq!(edges, "c.edges");
                assert_eq!(max_window, Some(3));
                assert_eq!(replicas, Some(4));
                assert!(config.is_none());
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_parse_build() {
        let cli = TestCli::try_parse_from([
            "qdep", "build", "-r", "data", "-n", "ghz", "--pretty", "-c", "qdep.yaml",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Build {
                root,
                name,
                config,
                max_window,
                replicas,
                pretty,
            } => {
                assert_eq!(root, "data");
                assert_eq!(name, "ghz");
                assert_eq!(config.as_deref(), Some("qdep.yaml"));
                assert!(max_window.is_none());
                assert!(replicas.is_none());
                assert!(pretty);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_parse_get_requires_index() {
        assert!(TestCli::try_parse_from(["qdep", "get", "-r", "d", "-n", "c"]).is_err());

        let cli =
            TestCli::try_parse_from(["qdep", "get", "-r", "d", "-n", "c", "-i", "42"]).unwrap();
        match cli.command {
            TestCommands::Get { index, compute, .. } => {
                assert_eq!(index, 42);
                assert!(!compute);
            }
            _ => panic!("Expected Get command"),
        }
    }

    #[test]
    fn test_parse_get_rejects_negative_index() {
        assert!(TestCli::try_parse_from(["qdep", "get", "-r", "d", "-n", "c", "-i", "-1"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli =
            TestCli::try_parse_from(["qdep", "version", "-vv", "--log-format", "json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, TestLogFormat::Json);
        assert!(matches!(cli.command, TestCommands::Version));

        assert!(TestCli::try_parse_from(["qdep", "version", "--log-format", "xml"]).is_err());
    }
}

// ============================================================================
// Binary workflow
// ============================================================================

mod workflow {
    use std::fs;
    use std::path::Path;
    use std::process::{Command, Output};

    use qdep_dataset::Sample;
    use qdep_formats::{read_attributes, read_edges};
    use qdep_ir::DependencyEdge;

    const OPS: &str = r#"[
        {"name": "h", "qubits": [0]},
        {"name": "cx", "qubits": [0, 1]},
        {"name": "cx", "qubits": [1, 2]},
        {"name": "measure", "qubits": [2]},
        {"name": "cx", "qubits": [0, 2]}
    ]"#;

    fn qdep(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_qdep"))
            .args(args)
            .env_remove("QDEP_MAX_WINDOW")
            .env_remove("QDEP_REPLICAS")
            .env_remove("QDEP_PRETTY")
            .output()
            .expect("failed to run qdep")
    }

    fn arg(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn test_version() {
        let out = qdep(&["version"]);
        assert!(out.status.success());
        assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_graph_build_get() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        fs::create_dir_all(&raw).unwrap();
        let ops = raw.join("small.json");
        fs::write(&ops, OPS).unwrap();

        let out = qdep(&["graph", "-i", arg(&ops)]);
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

        let edges = read_edges(&raw.join("small_dependency.edges")).unwrap();
        assert_eq!(
            edges,
            vec![DependencyEdge::new(0, 1), DependencyEdge::new(1, 2)]
        );
        assert_eq!(read_attributes(&raw.join("small_attr.json")).unwrap().len(), 3);

        let root = arg(dir.path());
        let out = qdep(&["build", "-r", root, "-n", "small", "--replicas", "2"]);
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
        assert!(dir.path().join("processed/small_7.json").is_file());
        assert!(!dir.path().join("processed/small_8.json").exists());

        let out = qdep(&["get", "-r", root, "-n", "small", "-i", "2"]);
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
        let sample: Sample = serde_json::from_slice(&out.stdout).unwrap();
        assert_eq!(sample.label, 1);
        assert_eq!(sample.edges, vec![DependencyEdge::new(1, 2)]);
    }

    #[test]
    fn test_plan_output() {
        let dir = tempfile::tempdir().unwrap();
        let edges = dir.path().join("c_dependency.edges");
        fs::write(&edges, "0 1\n1 2\n2 3\n3 4\n").unwrap();

        let out = qdep(&["plan", "-e", arg(&edges)]);
        assert!(out.status.success());
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.contains("8 variants, 80 samples"), "{stdout}");
    }

    #[test]
    fn test_get_before_build_fails() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        fs::create_dir_all(&raw).unwrap();
        fs::write(
            raw.join("c_attr.json"),
            r#"{"0": {"gate": "cx", "qubit_1": 0, "qubit_2": 1}}"#,
        )
        .unwrap();
        fs::write(raw.join("c_dependency.edges"), "").unwrap();

        let root = arg(dir.path());
        let out = qdep(&["get", "-r", root, "-n", "c", "-i", "0"]);
        assert!(!out.status.success());
        assert!(String::from_utf8_lossy(&out.stderr).contains("Error:"));

        let out = qdep(&["get", "-r", root, "-n", "c", "-i", "0", "--compute"]);
        assert!(out.status.success());
    }

    #[test]
    fn test_missing_input() {
        let out = qdep(&["graph", "-i", "/nonexistent/circuit.json"]);
        assert!(!out.status.success());
        assert!(String::from_utf8_lossy(&out.stderr).contains("File not found"));
    }
}
