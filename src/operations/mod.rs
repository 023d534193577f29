// src/operations/mod.rs

//! Operations a circuit is made of.
//!
//! [`GateOp`] is the reversible subset an oracle is allowed to use: bit
//! flips and controlled bit flips. [`Operation`] adds the superposition
//! step and the terminal measurement needed to turn an oracle into a full
//! Deutsch–Jozsa circuit.

use crate::core::Qubit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single reversible logic operation.
///
/// Order matters: oracle encodings are `Vec<GateOp>` applied front to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateOp {
    /// Unconditional bit flip (X).
    Flip {
        /// The bit to flip.
        target: Qubit,
    },
    /// Flip `target` iff `control` is 1 (CNOT).
    ControlledFlip {
        /// The bit that gates the flip.
        control: Qubit,
        /// The bit that is flipped.
        target: Qubit,
    },
}

impl GateOp {
    /// Shorthand for `GateOp::Flip`.
    pub fn flip(target: usize) -> Self {
        GateOp::Flip { target: Qubit(target) }
    }

    /// Shorthand for `GateOp::ControlledFlip`.
    pub fn controlled_flip(control: usize, target: usize) -> Self {
        GateOp::ControlledFlip { control: Qubit(control), target: Qubit(target) }
    }

    /// Qubits named by this gate.
    pub fn involved_qubits(&self) -> Vec<Qubit> {
        match self {
            GateOp::Flip { target } => vec![*target],
            GateOp::ControlledFlip { control, target } => vec![*control, *target],
        }
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateOp::Flip { target } => write!(f, "Flip({})", target.0),
            GateOp::ControlledFlip { control, target } => {
                write!(f, "ControlledFlip({}, {})", control.0, target.0)
            }
        }
    }
}

/// Gate kinds a noise model can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// Hadamard.
    Hadamard,
    /// Bit flip (X).
    Flip,
    /// Controlled bit flip (CNOT).
    ControlledFlip,
}

/// One step of a circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Hadamard: maps a basis bit into equal superposition.
    Hadamard {
        /// The target qubit.
        target: Qubit,
    },
    /// A reversible oracle gate.
    Gate(GateOp),
    /// Measure `targets` in the computational basis. Classical bit `i` of the
    /// outcome holds `targets[i]`.
    Measure {
        /// The qubits to read out, in classical-bit order.
        targets: Vec<Qubit>,
    },
}

impl Operation {
    /// Returns a list of all qubits directly mentioned in the operation's parameters.
    pub fn involved_qubits(&self) -> Vec<Qubit> {
        match self {
            Operation::Hadamard { target } => vec![*target],
            Operation::Gate(gate) => gate.involved_qubits(),
            Operation::Measure { targets } => targets.clone(),
        }
    }

    /// The gate kind, or `None` for a measurement.
    pub fn kind(&self) -> Option<GateKind> {
        match self {
            Operation::Hadamard { .. } => Some(GateKind::Hadamard),
            Operation::Gate(GateOp::Flip { .. }) => Some(GateKind::Flip),
            Operation::Gate(GateOp::ControlledFlip { .. }) => Some(GateKind::ControlledFlip),
            Operation::Measure { .. } => None,
        }
    }
}

impl From<GateOp> for Operation {
    fn from(gate: GateOp) -> Self {
        Operation::Gate(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_involved_qubits() {
        assert_eq!(GateOp::flip(2).involved_qubits(), vec![Qubit(2)]);
        assert_eq!(
            Operation::from(GateOp::controlled_flip(0, 3)).involved_qubits(),
            vec![Qubit(0), Qubit(3)]
        );
        assert_eq!(
            Operation::Measure { targets: vec![Qubit(0), Qubit(1)] }.involved_qubits(),
            vec![Qubit(0), Qubit(1)]
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(Operation::Hadamard { target: Qubit(0) }.kind(), Some(GateKind::Hadamard));
        assert_eq!(Operation::from(GateOp::flip(1)).kind(), Some(GateKind::Flip));
        assert_eq!(Operation::Measure { targets: vec![] }.kind(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(GateOp::flip(1).to_string(), "Flip(1)");
        assert_eq!(GateOp::controlled_flip(0, 1).to_string(), "ControlledFlip(0, 1)");
    }
}
