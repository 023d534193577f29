// src/lib.rs

//! `deutsch` - Deutsch and Deutsch–Jozsa oracles, end to end
//!
//! The crate owns two pieces of logic: the encoding of a named oracle into
//! reversible gates ([`oracles`]) and the decision whether a measured oracle
//! is constant or balanced ([`classification`]). Circuits are executed by any
//! [`Simulator`]; [`StateVectorSimulator`] is the bundled dense backend.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod oracles;
pub mod classification;
pub mod simulation;
pub mod algorithms;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use core::{DeutschError, Qubit};
pub use operations::{GateKind, GateOp, Operation};
pub use circuits::{Circuit, CircuitBuilder};
pub use oracles::{OracleKind, OracleSpec, encode, encode_named};
pub use classification::{Classification, ClassificationPolicy, classify, classify_with};
pub use simulation::{MeasurementHistogram, NoiseModel, RunConfig, Simulator, StateVectorSimulator};
pub use algorithms::{OracleRun, TrialReport, deutsch_jozsa_circuit, run_named, run_oracle, run_trials};

// Example 1: Deutsch's algorithm on all four single-bit oracles
// A noiseless backend answers every oracle correctly from one batch of shots.
/// ```
/// use deutsch::{OracleKind, OracleSpec, RunConfig, StateVectorSimulator, run_oracle, DeutschError};
///
/// let simulator = StateVectorSimulator::new();
/// let config = RunConfig::new().with_shots(1024).with_seed(7);
///
/// for kind in OracleKind::DEUTSCH {
///     let spec = OracleSpec::deutsch(kind)?;
///     let run = run_oracle(&simulator, &spec, &config)?;
///     println!("{}", run);
///     assert!(run.is_correct());
///     assert_eq!(run.histogram.total(), 1024);
/// }
/// # Ok::<(), DeutschError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Classifying a histogram without running anything
// The single-bit rule is a strict majority; the n-bit rule is exact.
/// ```
/// use deutsch::{Classification, MeasurementHistogram, classify, DeutschError};
///
/// let tie = MeasurementHistogram::from_counts(1, [("0", 5), ("1", 5)])?;
/// assert_eq!(classify(&tie), Classification::Balanced);
///
/// let stray = MeasurementHistogram::from_counts(3, [("000", 500), ("101", 524)])?;
/// assert_eq!(classify(&stray), Classification::Balanced);
///
/// let zeros = MeasurementHistogram::from_counts(3, [("000", 1024)])?;
/// assert_eq!(classify(&zeros), Classification::Constant);
/// # Ok::<(), DeutschError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
