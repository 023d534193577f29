// src/simulation/engine.rs
use crate::core::{DeutschError, Qubit, StateVector};
use crate::operations::{GateOp, Operation};
use num_complex::Complex;
use num_traits::Zero;
use rand::Rng;
use std::f64::consts::FRAC_1_SQRT_2;

/// Largest register the dense engine accepts (2^24 amplitudes).
pub(crate) const MAX_QUBITS: usize = 24;

/// Pauli errors injected by the noise model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pauli {
    X,
    Y,
    Z,
}

impl Pauli {
    /// Draws from the single-qubit depolarizing channel with probability `p`:
    /// no error with probability `1 - 3p/4`, otherwise X, Y or Z uniformly.
    pub(crate) fn sample_depolarizing<R: Rng>(rng: &mut R, p: f64) -> Option<Pauli> {
        if rng.random::<f64>() >= 0.75 * p {
            return None;
        }
        match rng.random_range(0..3) {
            0 => Some(Pauli::X),
            1 => Some(Pauli::Y),
            _ => Some(Pauli::Z),
        }
    }

    fn matrix(&self) -> [[Complex<f64>; 2]; 2] {
        let i = Complex::i();
        match self {
            Pauli::X => [
                [Complex::zero(), Complex::new(1.0, 0.0)],
                [Complex::new(1.0, 0.0), Complex::zero()],
            ],
            Pauli::Y => [[Complex::zero(), -i], [i, Complex::zero()]],
            Pauli::Z => [
                [Complex::new(1.0, 0.0), Complex::zero()],
                [Complex::zero(), Complex::new(-1.0, 0.0)],
            ],
        }
    }
}

fn hadamard_matrix() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
    ]
}

/// Dense state-vector engine for a fixed register.
/// Qubit `i` is bit `i` of the basis index. Starts in `|0...0>`.
#[derive(Debug, Clone)]
pub(crate) struct SimulationEngine {
    num_qubits: usize,
    state: StateVector,
}

impl SimulationEngine {
    pub(crate) fn init(num_qubits: usize) -> Result<Self, DeutschError> {
        if num_qubits == 0 {
            return Err(DeutschError::simulation("Cannot initialize simulation engine with zero qubits"));
        }
        if num_qubits > MAX_QUBITS {
            return Err(DeutschError::simulation(format!(
                "{} qubits exceed the engine limit of {}",
                num_qubits, MAX_QUBITS
            )));
        }
        Ok(Self {
            num_qubits,
            state: StateVector::zero_state(1 << num_qubits),
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), DeutschError> {
        if state.dim() != self.state.dim() {
            return Err(DeutschError::simulation(format!(
                "Cannot set state: provided dimension {} does not match engine dimension {}",
                state.dim(),
                self.state.dim()
            )));
        }
        self.state = state;
        Ok(())
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Applies a single unitary operation. Measurement is handled by the caller.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), DeutschError> {
        match op {
            Operation::Hadamard { target } => {
                let target_idx = self.check_qubit(target)?;
                self.apply_single_qubit_gate(target_idx, &hadamard_matrix());
            }
            Operation::Gate(GateOp::Flip { target }) => {
                let target_idx = self.check_qubit(target)?;
                self.apply_single_qubit_gate(target_idx, &Pauli::X.matrix());
            }
            Operation::Gate(GateOp::ControlledFlip { control, target }) => {
                let control_idx = self.check_qubit(control)?;
                let target_idx = self.check_qubit(target)?;
                if control_idx == target_idx {
                    return Err(DeutschError::simulation(format!(
                        "Control and target cannot both be {} for a controlled flip",
                        control
                    )));
                }
                self.apply_controlled_flip(control_idx, target_idx);
            }
            Operation::Measure { .. } => {
                return Err(DeutschError::simulation(
                    "Measure operation should not be passed directly to apply_operation",
                ));
            }
        }
        Ok(())
    }

    /// Applies a Pauli error to `target`.
    pub(crate) fn apply_pauli(&mut self, target: &Qubit, pauli: Pauli) -> Result<(), DeutschError> {
        let target_idx = self.check_qubit(target)?;
        self.apply_single_qubit_gate(target_idx, &pauli.matrix());
        Ok(())
    }

    /// Probability of every classical outcome when measuring `measured`.
    /// Entry `m` has bit `i` equal to the value read from `measured[i]`.
    pub(crate) fn marginal_distribution(&self, measured: &[Qubit]) -> Result<Vec<f64>, DeutschError> {
        for q in measured {
            self.check_qubit(q)?;
        }
        let mut distribution = vec![0.0; 1 << measured.len()];
        for (k, amplitude) in self.state.amplitudes().iter().enumerate() {
            let p = amplitude.norm_sqr();
            if p == 0.0 {
                continue;
            }
            distribution[Self::project(k, measured)] += p;
        }
        Ok(distribution)
    }

    /// Reads the bits of basis index `k` at `measured`, packed into classical bit order.
    pub(crate) fn project(k: usize, measured: &[Qubit]) -> usize {
        measured
            .iter()
            .enumerate()
            .fold(0, |acc, (bit, q)| acc | (((k >> q.0) & 1) << bit))
    }

    fn check_qubit(&self, qubit: &Qubit) -> Result<usize, DeutschError> {
        if qubit.0 >= self.num_qubits {
            return Err(DeutschError::simulation(format!(
                "Qubit {} is outside the {}-qubit register",
                qubit, self.num_qubits
            )));
        }
        Ok(qubit.0)
    }

    /// Applies a 2x2 matrix to one qubit, pairing basis states that differ only at `target_idx`.
    fn apply_single_qubit_gate(&mut self, target_idx: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let mask = 1usize << target_idx;
        let amplitudes = self.state.amplitudes_mut();
        for i0 in 0..amplitudes.len() {
            if i0 & mask != 0 {
                continue;
            }
            let i1 = i0 | mask;
            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// CNOT as a permutation: swap `|c=1,t=0>` and `|c=1,t=1>` amplitudes.
    fn apply_controlled_flip(&mut self, control_idx: usize, target_idx: usize) {
        let control_mask = 1usize << control_idx;
        let target_mask = 1usize << target_idx;
        let amplitudes = self.state.amplitudes_mut();
        for k in 0..amplitudes.len() {
            if k & control_mask != 0 && k & target_mask == 0 {
                amplitudes.swap(k, k | target_mask);
            }
        }
    }
}

/// Picks an index from `cumulative` (a running sum ending at ~1.0) with `u` in `[0, 1)`.
/// Falls back to the last index with non-zero weight when rounding leaves `u` past the end.
pub(crate) fn sample_index(cumulative: &[f64], u: f64) -> usize {
    let total = cumulative.last().copied().unwrap_or(0.0);
    let target = u * total;
    match cumulative.iter().position(|c| target < *c) {
        Some(index) => index,
        None => cumulative
            .windows(2)
            .rposition(|w| w[1] > w[0])
            .map(|i| i + 1)
            .unwrap_or(0),
    }
}

/// Running sum of `distribution`.
pub(crate) fn cumulative(distribution: &[f64]) -> Vec<f64> {
    distribution
        .iter()
        .scan(0.0, |acc, p| {
            *acc += p;
            Some(*acc)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn h(q: usize) -> Operation {
        Operation::Hadamard { target: Qubit(q) }
    }

    #[test]
    fn test_init_limits() {
        assert!(SimulationEngine::init(0).is_err());
        assert!(SimulationEngine::init(MAX_QUBITS + 1).is_err());
        assert!(SimulationEngine::init(3).is_ok());
    }

    #[test]
    fn test_hadamard_gives_equal_split() -> Result<(), DeutschError> {
        let mut engine = SimulationEngine::init(1)?;
        engine.apply_operation(&h(0))?;
        let dist = engine.marginal_distribution(&[Qubit(0)])?;
        assert_relative_eq!(dist[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(dist[1], 0.5, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_hadamard_twice_is_identity() -> Result<(), DeutschError> {
        let mut engine = SimulationEngine::init(2)?;
        engine.apply_operation(&h(1))?;
        engine.apply_operation(&h(1))?;
        assert_relative_eq!(engine.state().amplitudes()[0].re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(engine.state().probabilities().iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_controlled_flip_truth_table() -> Result<(), DeutschError> {
        for (control_value, expected_target) in [(0, 0), (1, 1)] {
            let mut engine = SimulationEngine::init(2)?;
            if control_value == 1 {
                engine.apply_operation(&GateOp::flip(0).into())?;
            }
            engine.apply_operation(&GateOp::controlled_flip(0, 1).into())?;
            let dist = engine.marginal_distribution(&[Qubit(1)])?;
            assert_relative_eq!(dist[expected_target], 1.0, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_phase_kickback_on_balanced_oracle() -> Result<(), DeutschError> {
        // Deutsch circuit with f(x) = x: input must read 1 with certainty.
        let mut engine = SimulationEngine::init(2)?;
        engine.apply_operation(&GateOp::flip(1).into())?;
        engine.apply_operation(&h(0))?;
        engine.apply_operation(&h(1))?;
        engine.apply_operation(&GateOp::controlled_flip(0, 1).into())?;
        engine.apply_operation(&h(0))?;
        let dist = engine.marginal_distribution(&[Qubit(0)])?;
        assert_relative_eq!(dist[1], 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_invalid_operations() -> Result<(), DeutschError> {
        let mut engine = SimulationEngine::init(2)?;
        assert!(engine.apply_operation(&GateOp::controlled_flip(1, 1).into()).is_err());
        assert!(engine.apply_operation(&GateOp::flip(2).into()).is_err());
        assert!(engine.apply_operation(&Operation::Measure { targets: vec![Qubit(0)] }).is_err());
        Ok(())
    }

    #[test]
    fn test_pauli_y_and_z_on_plus_state() -> Result<(), DeutschError> {
        // Z maps |+> to |->, which H takes to |1>. Y does the same up to phase.
        for pauli in [Pauli::Z, Pauli::Y] {
            let mut engine = SimulationEngine::init(1)?;
            engine.apply_operation(&h(0))?;
            engine.apply_pauli(&Qubit(0), pauli)?;
            engine.apply_operation(&h(0))?;
            let dist = engine.marginal_distribution(&[Qubit(0)])?;
            assert_relative_eq!(dist[1], 1.0, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_set_state_checks_dimension() -> Result<(), DeutschError> {
        let mut engine = SimulationEngine::init(2)?;
        assert!(engine.set_state(StateVector::zero_state(2)).is_err());
        engine.set_state(StateVector::new(vec![
            Complex::zero(),
            Complex::zero(),
            Complex::zero(),
            Complex::new(1.0, 0.0),
        ]))?;
        let dist = engine.marginal_distribution(&[Qubit(1), Qubit(0)])?;
        assert_relative_eq!(dist[0b11], 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_project_orders_bits_by_target() {
        // Basis |q2 q1 q0> = |1 0 1>
        assert_eq!(SimulationEngine::project(0b101, &[Qubit(0), Qubit(1)]), 0b01);
        assert_eq!(SimulationEngine::project(0b101, &[Qubit(2), Qubit(1), Qubit(0)]), 0b101);
        assert_eq!(SimulationEngine::project(0b100, &[Qubit(2)]), 0b1);
    }

    #[test]
    fn test_sample_index() {
        let cum = cumulative(&[0.25, 0.0, 0.75]);
        assert_eq!(sample_index(&cum, 0.0), 0);
        assert_eq!(sample_index(&cum, 0.3), 2);
        assert_eq!(sample_index(&cum, 0.999_999), 2);
        // Rounding past the end lands on the last outcome with weight.
        assert_eq!(sample_index(&cumulative(&[0.5, 0.5, 0.0]), 1.0), 1);
    }

    #[test]
    fn test_depolarizing_sample_rates() {
        let mut rng = StdRng::seed_from_u64(11);
        assert!((0..1000).all(|_| Pauli::sample_depolarizing(&mut rng, 0.0).is_none()));
        let hits = (0..10_000)
            .filter(|_| Pauli::sample_depolarizing(&mut rng, 1.0).is_some())
            .count();
        // Expect 75% with a wide margin.
        assert!((7000..8000).contains(&hits), "hits = {}", hits);
    }
}
