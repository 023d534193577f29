// src/validation/mod.rs

//! Provides functions to validate a `StateVector` before it is sampled.

use crate::core::{DeutschError, StateVector};

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to 1e-9.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(DeutschError::SimulationFailure)` if normalization fails.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), DeutschError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.amplitudes().iter().map(|c| c.norm_sqr()).sum();
    if !norm_sq.is_finite() || (norm_sq - 1.0).abs() > effective_tolerance {
        Err(DeutschError::simulation(format!(
            "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
            norm_sq, effective_tolerance
        )))
    } else {
        Ok(())
    }
}

/// Checks that the dimension matches a register of `num_qubits` qubits and
/// that the state is normalized.
pub fn validate_state(state: &StateVector, num_qubits: usize, norm_tolerance: Option<f64>) -> Result<(), DeutschError> {
    let expected_dim = u32::try_from(num_qubits)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .unwrap_or(0);
    if state.dim() != expected_dim {
        return Err(DeutschError::simulation(format!(
            "State dimension {} does not match a register of {} qubits",
            state.dim(),
            num_qubits
        )));
    }
    check_normalization(state, norm_tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_normalized_state_passes() -> Result<(), DeutschError> {
        let state = StateVector::new(vec![Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(0.0, -FRAC_1_SQRT_2)]);
        validate_state(&state, 1, None)
    }

    #[test]
    fn test_unnormalized_state_fails() {
        let state = StateVector::new(vec![Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)]);
        assert!(matches!(check_normalization(&state, None), Err(DeutschError::SimulationFailure { .. })));
    }

    #[test]
    fn test_dimension_mismatch_fails() {
        let state = StateVector::zero_state(4);
        assert!(validate_state(&state, 3, None).is_err());
    }

    #[test]
    fn test_huge_qubit_count_does_not_wrap() {
        // (1 << 32) + 1 must not be read as a 1-qubit register.
        let state = StateVector::zero_state(2);
        let num_qubits = ((1u64 << 32) + 1) as usize;
        assert!(validate_state(&state, num_qubits, None).is_err());
        assert!(validate_state(&state, 65, None).is_err());
    }
}
