//! Error handling logic

use thiserror::Error;

/// Errors surfaced at the crate boundary.
///
/// Encoding and simulation are the only fallible stages of the pipeline.
/// Classification is total and never produces an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeutschError {
    /// The oracle name is unknown, or it is not defined for the requested arity.
    /// Raised before any gate is produced.
    #[error("Invalid Oracle: '{name}' is not defined for arity {arity}")]
    InvalidOracle {
        /// The rejected oracle tag, as supplied by the caller
        name: String,
        /// Number of input bits requested
        arity: usize,
    },

    /// A bare tag matched no oracle variant. No arity was involved.
    #[error("Unknown Oracle: '{name}' is not a known oracle tag")]
    UnknownOracle {
        /// The rejected oracle tag
        name: String,
    },

    /// Failure reported by a simulator backend. Passed through unchanged.
    #[error("Simulation Failure: {message}")]
    SimulationFailure {
        /// SimulationFailure message
        message: String,
    },

    /// A run configuration could not be parsed or is out of range.
    #[error("Invalid Config: {message}")]
    InvalidConfig {
        /// InvalidConfig message
        message: String,
    },

    /// A histogram key broke the fixed-width `{0,1}` alphabet invariant.
    #[error("Malformed Histogram: {message}")]
    MalformedHistogram {
        /// MalformedHistogram message
        message: String,
    },
}

impl DeutschError {
    pub(crate) fn simulation(message: impl Into<String>) -> Self {
        DeutschError::SimulationFailure { message: message.into() }
    }

    pub(crate) fn histogram(message: impl Into<String>) -> Self {
        DeutschError::MalformedHistogram { message: message.into() }
    }
}
