//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The qubit index as a float feature value.
    #[inline]
    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(3)), "q3");
    }

    #[test]
    fn test_qubit_serializes_as_number() {
        let json = serde_json::to_string(&QubitId(7)).unwrap();
        assert_eq!(json, "7");
        let back: QubitId = serde_json::from_str("7").unwrap();
        assert_eq!(back, QubitId(7));
    }
}
