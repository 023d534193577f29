// src/algorithms/mod.rs

//! Deutsch and Deutsch–Jozsa, end to end.
//!
//! The circuit for an oracle of arity `n` on qubits `0..=n`:
//!
//! 1. flip the output qubit `n` to `|1>`,
//! 2. Hadamard on all `n + 1` qubits,
//! 3. the oracle's gate sequence,
//! 4. Hadamard on the inputs `0..n`,
//! 5. measure the inputs (qubit `i` into classical bit `i`).
//!
//! For `n = 1` this is Deutsch's circuit. A constant oracle leaves the
//! inputs in `|0...0>`; a balanced one never does.

mod trials;

pub use trials::{TrialReport, run_trials};

use crate::circuits::{Circuit, CircuitBuilder};
use crate::classification::{Classification, classify};
use crate::core::DeutschError;
use crate::operations::Operation;
use crate::oracles::{OracleSpec, encode};
use crate::simulation::{MeasurementHistogram, RunConfig, Simulator};
use log::{debug, info};
use std::fmt;

/// Builds the Deutsch–Jozsa circuit around `spec`'s oracle.
pub fn deutsch_jozsa_circuit(spec: &OracleSpec) -> Circuit {
    let n = spec.arity();
    let output = spec.output_bit();
    let oracle = encode(spec);

    let circuit = CircuitBuilder::with_qubits(spec.register_width())
        .flip(output)
        .add_ops((0..=n).map(|q| Operation::Hadamard { target: q.into() }))
        .gates(&oracle)
        .add_ops((0..n).map(|q| Operation::Hadamard { target: q.into() }))
        .measure(0..n)
        .build();
    debug!("built {}-operation circuit for {}", circuit.len(), spec);
    circuit
}

/// Result of running one oracle through the pipeline once.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleRun {
    /// The oracle that was queried.
    pub spec: OracleSpec,
    /// Measurement counts over the input bits.
    pub histogram: MeasurementHistogram,
    /// What the classifier concluded.
    pub classification: Classification,
}

impl OracleRun {
    /// The classification a correct run reports for this oracle.
    pub fn expected(&self) -> Classification {
        self.spec.kind().expected()
    }

    /// Whether the classifier got it right.
    pub fn is_correct(&self) -> bool {
        self.classification == self.expected()
    }
}

impl fmt::Display for OracleRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (counts: {})",
            self.spec, self.classification, self.histogram
        )
    }
}

/// Encodes `spec`, runs the circuit on `simulator` and classifies the result.
///
/// # Errors
/// Simulator failures are returned unchanged. A histogram whose width is not
/// the oracle's arity, or whose total is not `config.shots`, is rejected as
/// `SimulationFailure` before classification.
pub fn run_oracle<S>(simulator: &S, spec: &OracleSpec, config: &RunConfig) -> Result<OracleRun, DeutschError>
where
    S: Simulator + ?Sized,
{
    let circuit = deutsch_jozsa_circuit(spec);
    let histogram = simulator.run(&circuit, config)?;
    check_backend_output(spec, config, &histogram)?;
    let classification = classify(&histogram);
    info!("{} classified as {} from {} shots", spec, classification, histogram.total());
    Ok(OracleRun {
        spec: *spec,
        histogram,
        classification,
    })
}

/// Rejects histograms that break the [`Simulator`] contract for `spec`.
fn check_backend_output(
    spec: &OracleSpec,
    config: &RunConfig,
    histogram: &MeasurementHistogram,
) -> Result<(), DeutschError> {
    if histogram.width() != spec.arity() {
        return Err(DeutschError::simulation(format!(
            "backend returned {}-bit outcomes for {}",
            histogram.width(),
            spec
        )));
    }
    if histogram.total() != config.shots as u64 {
        return Err(DeutschError::simulation(format!(
            "backend returned {} shots, {} were requested",
            histogram.total(),
            config.shots
        )));
    }
    Ok(())
}

/// Parses `name`, then behaves like [`run_oracle`].
///
/// # Errors
/// `InvalidOracle` before anything is simulated if the tag is unknown or
/// unsupported at `arity`.
pub fn run_named<S>(simulator: &S, name: &str, arity: usize, config: &RunConfig) -> Result<OracleRun, DeutschError>
where
    S: Simulator + ?Sized,
{
    let spec = OracleSpec::parse(name, arity)?;
    run_oracle(simulator, &spec, config)
}
