// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! operations (`deutsch::operations::Operation`).
//!
//! A [`Circuit`] acts on a register of qubits `0..num_qubits`. The register
//! grows automatically to cover every qubit an added operation names, and
//! can be reserved up front with [`CircuitBuilder::with_qubits`].

use crate::core::Qubit;
use crate::operations::{GateOp, Operation};
use std::fmt;

/// Represents an ordered sequence of Operations applied to a qubit register.
#[derive(Clone, PartialEq, Eq)]
pub struct Circuit {
    /// Register width. Every qubit index used by `operations` is below this.
    num_qubits: usize,

    /// The ordered sequence of operations. Later operations apply after earlier ones.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit over zero qubits.
    pub fn new() -> Self {
        Self {
            num_qubits: 0,
            operations: Vec::new(),
        }
    }

    /// Creates an empty circuit over `num_qubits` qubits.
    pub fn with_qubits(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            operations: Vec::new(),
        }
    }

    /// Adds a single operation to the end of the circuit's sequence,
    /// widening the register if the operation names a new qubit.
    pub fn add_operation(&mut self, op: Operation) {
        if let Some(max) = op.involved_qubits().iter().map(Qubit::index).max() {
            self.num_qubits = self.num_qubits.max(max + 1);
        }
        self.operations.push(op);
    }

    /// Adds multiple operations from an iterator to the end of the circuit's sequence.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Returns a slice containing the ordered sequence of operations in this circuit.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The measured qubits, if the circuit contains a measurement.
    pub fn measured_qubits(&self) -> Option<&[Qubit]> {
        self.operations.iter().find_map(|op| match op {
            Operation::Measure { targets } => Some(targets.as_slice()),
            _ => None,
        })
    }

    /// Returns the total number of operations defined in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Creates a builder whose register already spans `num_qubits` qubits.
    pub fn with_qubits(num_qubits: usize) -> Self {
        Self { circuit: Circuit::with_qubits(num_qubits) }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Appends a Hadamard on `target`.
    pub fn hadamard(self, target: usize) -> Self {
        self.add_op(Operation::Hadamard { target: Qubit(target) })
    }

    /// Appends an unconditional flip on `target`.
    pub fn flip(self, target: usize) -> Self {
        self.add_op(GateOp::flip(target).into())
    }

    /// Appends a controlled flip.
    pub fn controlled_flip(self, control: usize, target: usize) -> Self {
        self.add_op(GateOp::controlled_flip(control, target).into())
    }

    /// Appends a sequence of oracle gates in order.
    pub fn gates<'a, I>(self, gates: I) -> Self
    where
        I: IntoIterator<Item = &'a GateOp>,
    {
        self.add_ops(gates.into_iter().map(|g| Operation::Gate(*g)))
    }

    /// Appends a measurement of `targets`; `targets[i]` lands in classical bit `i`.
    pub fn measure<I>(self, targets: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let targets = targets.into_iter().map(Qubit).collect();
        self.add_op(Operation::Measure { targets })
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "Circuit[0 operations on {} qubits]", self.num_qubits);
        }

        let ops = &self.operations;
        let num_ops = ops.len();
        let num_qubits = self.num_qubits;

        let max_label_width = format!("{}", Qubit(num_qubits.saturating_sub(1))).len();
        let label_padding = " ".repeat(max_label_width + 2); // Label + ": "

        const GATE_WIDTH: usize = 7; // e.g., "───H───"
        const WIRE: &str = "───────"; // GATE_WIDTH dashes
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] holds the wire segment; v_connect[row][time] the connector below it
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_qubits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Hadamard { target } => {
                    op_grid[target.0][t] = format_gate("H");
                }
                Operation::Gate(GateOp::Flip { target }) => {
                    op_grid[target.0][t] = format_gate("X");
                }
                Operation::Gate(GateOp::ControlledFlip { control, target }) => {
                    op_grid[control.0][t] = format_gate("@");
                    op_grid[target.0][t] = format_gate("X");

                    let r_min = control.0.min(target.0);
                    let r_max = control.0.max(target.0);
                    for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row_vec[t] = V_WIRE;
                    }
                }
                Operation::Measure { targets } => {
                    for (bit, target) in targets.iter().enumerate() {
                        op_grid[target.0][t] = format_gate(&format!("M{}", bit));
                    }
                }
            }
        }

        writeln!(f, "Circuit[{} operations on {} qubits]", num_ops, num_qubits)?;
        for r in 0..num_qubits {
            let label = format!("{}: ", Qubit(r));
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
