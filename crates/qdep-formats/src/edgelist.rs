//! Edge-list text format: one `<src> <dst>` pair per line.

use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

use qdep_ir::DependencyEdge;

use crate::error::{FormatError, FormatResult, read_file, write_file};

/// Parse an edge list.
///
/// Blank lines are skipped. Any other line must be two non-negative
/// integers joined by exactly one space, optionally followed by `\r`; a bad
/// line aborts the whole parse.
pub fn parse_edges(source: &str) -> FormatResult<Vec<DependencyEdge>> {
    let mut edges = Vec::new();

    for (i, raw) in source.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        let malformed = |reason: String| FormatError::MalformedEdge {
            line: i + 1,
            content: line.to_string(),
            reason,
        };

        let Some((src, dst)) = line.split_once(' ') else {
            return Err(malformed("expected '<src> <dst>' separated by one space".into()));
        };

        let from = parse_index(src).map_err(|e| malformed(format!("source '{src}': {e}")))?;
        let to = parse_index(dst).map_err(|e| malformed(format!("destination '{dst}': {e}")))?;

        edges.push(DependencyEdge::new(from, to));
    }

    Ok(edges)
}

fn parse_index(field: &str) -> Result<usize, String> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err("not a non-negative integer".into());
    }
    field.parse::<usize>().map_err(|e| e.to_string())
}

/// Count the non-blank lines of an edge list without parsing them.
pub fn count_edges(source: &str) -> usize {
    source.lines().filter(|l| !l.trim().is_empty()).count()
}

/// Emit an edge list, one newline-terminated line per edge.
pub fn emit_edges(edges: &[DependencyEdge]) -> String {
    let mut out = String::with_capacity(edges.len() * 8);
    for edge in edges {
        let _ = writeln!(out, "{} {}", edge.source, edge.destination);
    }
    out
}

/// Read and parse an edge-list file.
pub fn read_edges(path: &Path) -> FormatResult<Vec<DependencyEdge>> {
    let edges = parse_edges(&read_file(path)?)?;
    debug!("Read {} edges from {}", edges.len(), path.display());
    Ok(edges)
}

/// Write an edge-list file.
pub fn write_edges(path: &Path, edges: &[DependencyEdge]) -> FormatResult<()> {
    write_file(path, &emit_edges(edges))?;
    debug!("Wrote {} edges to {}", edges.len(), path.display());
    Ok(())
}
