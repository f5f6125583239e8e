//! Operation-list JSON, the hand-off format from upstream circuit parsers.
//!
//! ```json
//! [
//!     { "name": "h", "qubits": [0] },
//!     { "name": "cx", "qubits": [0, 1] }
//! ]
//! ```

use std::path::Path;
use tracing::debug;

use qdep_ir::GateOp;

use crate::error::{FormatResult, read_file};

/// Parse an operation list.
pub fn parse_ops(source: &str) -> FormatResult<Vec<GateOp>> {
    Ok(serde_json::from_str(source)?)
}

/// Read and parse an operation-list file.
pub fn read_ops(path: &Path) -> FormatResult<Vec<GateOp>> {
    let ops = parse_ops(&read_file(path)?)?;
    debug!("Read {} operations from {}", ops.len(), path.display());
    Ok(ops)
}
