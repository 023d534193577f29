// src/core/qubit.rs

use std::fmt;

/// Index of a single bit in the register a circuit acts on.
///
/// For an oracle of arity `n`, qubits `0..n` carry the input and qubit `n`
/// is the output (ancilla) bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Qubit(pub usize);

impl Qubit {
    /// Gets the register position of this qubit.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for Qubit {
    fn from(index: usize) -> Self {
        Qubit(index)
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}
