// src/simulation/config.rs

//! Per-run configuration handed to a [`Simulator`](super::Simulator).
//!
//! Nothing about a run is global: shot count, seed and noise travel with
//! every call.

use crate::core::DeutschError;
use crate::operations::GateKind;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Shots per run when none are configured.
pub const DEFAULT_SHOTS: usize = 1024;

/// Single-qubit depolarizing error attached to selected gate kinds.
///
/// After each affected gate, every qubit it touched is left alone with
/// probability `1 - 3p/4` and hit by X, Y or Z with probability `p/4` each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseModel {
    /// Depolarizing probability `p` in `[0, 1]`.
    pub probability: f64,
    /// Gate kinds followed by the error channel.
    pub gates: Vec<GateKind>,
}

impl NoiseModel {
    /// Depolarizing error with probability `p` on Hadamard and Flip gates.
    pub fn depolarizing(probability: f64) -> Self {
        Self {
            probability,
            gates: vec![GateKind::Hadamard, GateKind::Flip],
        }
    }

    /// Replaces the affected gate kinds.
    pub fn on_gates<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = GateKind>,
    {
        self.gates = gates.into_iter().collect();
        self
    }

    /// Whether gates of `kind` are followed by the error channel.
    pub fn affects(&self, kind: GateKind) -> bool {
        self.gates.contains(&kind)
    }

    /// True if the model can never inject an error.
    pub fn is_noiseless(&self) -> bool {
        self.probability == 0.0 || self.gates.is_empty()
    }
}

/// Shots, seed and noise for one simulator invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of shots; must be positive.
    pub shots: usize,
    /// Seed for the sampling RNG. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Optional noise model. `None` is a noiseless run.
    pub noise: Option<NoiseModel>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            seed: None,
            noise: None,
        }
    }
}

impl RunConfig {
    /// Default configuration: 1024 shots, unseeded, noiseless.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shot count.
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    /// Fixes the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Attaches a noise model.
    pub fn with_noise(mut self, noise: NoiseModel) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, DeutschError> {
        let config: RunConfig = serde_json::from_str(json).map_err(|e| DeutschError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero shots and noise probabilities outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), DeutschError> {
        if self.shots == 0 {
            return Err(DeutschError::InvalidConfig {
                message: "shot count must be positive".to_string(),
            });
        }
        if let Some(noise) = &self.noise {
            if !(0.0..=1.0).contains(&noise.probability) {
                return Err(DeutschError::InvalidConfig {
                    message: format!("noise probability {} is outside [0, 1]", noise.probability),
                });
            }
        }
        Ok(())
    }

    /// The noise model, if it can inject errors at all.
    pub(crate) fn active_noise(&self) -> Option<&NoiseModel> {
        self.noise.as_ref().filter(|noise| !noise.is_noiseless())
    }

    /// RNG for one run, seeded from `seed` or from fresh entropy.
    pub(crate) fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed.unwrap_or_else(rand::random))
    }
}
