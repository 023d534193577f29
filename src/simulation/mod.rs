// src/simulation/mod.rs

//! Executes circuits and returns measurement histograms.
//!
//! [`Simulator`] is the seam between the crate's logic and whatever runs the
//! circuit. [`StateVectorSimulator`] is the bundled dense backend: it
//! evolves the full register, samples the terminal measurement from the
//! Born distribution and, when a [`NoiseModel`] is configured, replays the
//! circuit per shot with depolarizing errors.

mod config;
pub(crate) mod engine;
mod results;

pub use config::{DEFAULT_SHOTS, NoiseModel, RunConfig};
pub use results::MeasurementHistogram;

use crate::circuits::Circuit;
use crate::core::{DeutschError, Qubit};
use crate::operations::Operation;
use crate::validation::validate_state;
use engine::{Pauli, SimulationEngine, cumulative, sample_index};
use log::{debug, info, trace};
use rand::Rng;
use std::collections::HashSet;

/// A backend that runs a circuit for a number of shots.
///
/// Implementations must return a histogram whose width is the number of
/// measured qubits and whose total equals `config.shots`. Any failure is
/// reported as [`DeutschError::SimulationFailure`].
pub trait Simulator {
    /// Runs `circuit` under `config`.
    fn run(&self, circuit: &Circuit, config: &RunConfig) -> Result<MeasurementHistogram, DeutschError>;
}

impl<S: Simulator + ?Sized> Simulator for &S {
    fn run(&self, circuit: &Circuit, config: &RunConfig) -> Result<MeasurementHistogram, DeutschError> {
        (**self).run(circuit, config)
    }
}

/// Dense state-vector simulator.
#[derive(Debug, Default, Clone, Copy)]
pub struct StateVectorSimulator {}

impl StateVectorSimulator {
    /// Creates a new simulator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Simulator for StateVectorSimulator {
    fn run(&self, circuit: &Circuit, config: &RunConfig) -> Result<MeasurementHistogram, DeutschError> {
        config
            .validate()
            .map_err(|e| DeutschError::simulation(e.to_string()))?;
        let (unitary, measured) = split_terminal_measurement(circuit)?;
        let mut rng = config.rng();
        let mut histogram = MeasurementHistogram::new(measured.len());

        match config.active_noise() {
            None => {
                // 1. Evolve once, 2. sample every shot from the final distribution.
                let mut engine = SimulationEngine::init(circuit.num_qubits())?;
                for op in unitary {
                    engine.apply_operation(op)?;
                }
                validate_state(engine.state(), engine.num_qubits(), None)?;
                let cum = cumulative(&engine.marginal_distribution(measured)?);
                for _ in 0..config.shots {
                    histogram.record_outcome(sample_index(&cum, rng.random::<f64>()));
                }
            }
            Some(noise) => {
                // Each shot is an independent trajectory with its own error draws.
                for shot in 0..config.shots {
                    let mut engine = SimulationEngine::init(circuit.num_qubits())?;
                    for op in unitary {
                        engine.apply_operation(op)?;
                        if !op.kind().is_some_and(|kind| noise.affects(kind)) {
                            continue;
                        }
                        for qubit in op.involved_qubits() {
                            if let Some(pauli) = Pauli::sample_depolarizing(&mut rng, noise.probability) {
                                trace!("shot {}: {:?} error on {}", shot, pauli, qubit);
                                engine.apply_pauli(&qubit, pauli)?;
                            }
                        }
                    }
                    let cum = cumulative(&engine.marginal_distribution(measured)?);
                    histogram.record_outcome(sample_index(&cum, rng.random::<f64>()));
                }
            }
        }

        info!(
            "ran {}-qubit circuit for {} shots: {} distinct outcome(s)",
            circuit.num_qubits(),
            config.shots,
            histogram.len()
        );
        Ok(histogram)
    }
}

/// Splits a circuit into its unitary prefix and the qubits of its single,
/// final measurement.
fn split_terminal_measurement(circuit: &Circuit) -> Result<(&[Operation], &[Qubit]), DeutschError> {
    let (last, unitary) = circuit
        .operations()
        .split_last()
        .ok_or_else(|| DeutschError::simulation("Cannot run an empty circuit"))?;
    let measured = match last {
        Operation::Measure { targets } => targets.as_slice(),
        _ => return Err(DeutschError::simulation("Circuit must end with a measurement")),
    };
    if unitary.iter().any(|op| matches!(op, Operation::Measure { .. })) {
        return Err(DeutschError::simulation("Mid-circuit measurement is not supported"));
    }
    if measured.is_empty() {
        return Err(DeutschError::simulation("Measurement has no target qubits"));
    }
    let distinct: HashSet<&Qubit> = measured.iter().collect();
    if distinct.len() != measured.len() {
        return Err(DeutschError::simulation("A qubit is measured more than once"));
    }
    debug!("{} unitary operation(s), measuring {} qubit(s)", unitary.len(), measured.len());
    Ok((unitary, measured))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use approx::assert_relative_eq;

    #[test]
    fn test_split_requires_terminal_measurement() {
        let empty = Circuit::new();
        assert!(split_terminal_measurement(&empty).is_err());

        let unmeasured = CircuitBuilder::new().hadamard(0).build();
        assert!(split_terminal_measurement(&unmeasured).is_err());

        let mid = CircuitBuilder::new().measure([0]).hadamard(0).measure([0]).build();
        assert!(split_terminal_measurement(&mid).is_err());

        let twice = CircuitBuilder::new().hadamard(0).hadamard(1).measure([0, 0]).build();
        assert!(split_terminal_measurement(&twice).is_err());
    }

    #[test]
    fn test_split_returns_measured_qubits() -> Result<(), DeutschError> {
        let circuit = CircuitBuilder::new().hadamard(0).flip(1).measure([1, 0]).build();
        let (unitary, measured) = split_terminal_measurement(&circuit)?;
        assert_eq!(unitary.len(), 2);
        assert_eq!(measured, &[Qubit(1), Qubit(0)]);
        Ok(())
    }

    #[test]
    fn test_histogram_sums_to_shots() -> Result<(), DeutschError> {
        let circuit = CircuitBuilder::new().hadamard(0).hadamard(1).measure([0, 1]).build();
        let config = RunConfig::new().with_shots(4000).with_seed(3);
        let histogram = StateVectorSimulator::new().run(&circuit, &config)?;
        assert_eq!(histogram.width(), 2);
        assert_eq!(histogram.total(), 4000);
        for key in ["00", "01", "10", "11"] {
            let freq = histogram.count(key) as f64 / 4000.0;
            assert_relative_eq!(freq, 0.25, epsilon = 0.05);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_a_simulation_failure() {
        let circuit = CircuitBuilder::new().measure([0]).build();
        let result = StateVectorSimulator::new().run(&circuit, &RunConfig::new().with_shots(0));
        assert!(matches!(result, Err(DeutschError::SimulationFailure { .. })));
    }

    #[test]
    fn test_full_noise_randomizes_a_basis_state() -> Result<(), DeutschError> {
        // X on |0> followed by p = 1 depolarizing: X and Y errors flip back to 0.
        let circuit = CircuitBuilder::new().flip(0).measure([0]).build();
        let config = RunConfig::new()
            .with_shots(2000)
            .with_seed(5)
            .with_noise(NoiseModel::depolarizing(1.0));
        let histogram = StateVectorSimulator::new().run(&circuit, &config)?;
        assert_eq!(histogram.total(), 2000);
        let zeros = histogram.count("0") as f64 / 2000.0;
        assert_relative_eq!(zeros, 0.5, epsilon = 0.05);
        Ok(())
    }

    #[test]
    fn test_simulator_through_reference() -> Result<(), DeutschError> {
        let simulator = StateVectorSimulator::new();
        let by_ref: &dyn Simulator = &simulator;
        let circuit = CircuitBuilder::new().flip(0).measure([0]).build();
        let histogram = by_ref.run(&circuit, &RunConfig::new().with_shots(10).with_seed(1))?;
        assert_eq!(histogram.count("1"), 10);
        Ok(())
    }
}
