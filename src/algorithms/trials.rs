// src/algorithms/trials.rs

//! Repeated runs of one oracle, aggregated into a success rate.

use super::{OracleRun, run_oracle};
use crate::classification::Classification;
use crate::core::DeutschError;
use crate::oracles::OracleSpec;
use crate::simulation::{RunConfig, Simulator};
use log::info;
use rayon::prelude::*;
use std::fmt;

/// Spreads per-trial seeds apart so neighbouring trials do not share streams.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Aggregate of `trials` independent runs of one oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialReport {
    /// The oracle that was queried.
    pub spec: OracleSpec,
    /// What a correct run reports.
    pub expected: Classification,
    /// Number of runs.
    pub trials: usize,
    /// Runs that classified correctly.
    pub successes: usize,
}

impl TrialReport {
    /// Builds a report from finished runs.
    pub fn from_runs(spec: OracleSpec, runs: &[OracleRun]) -> Self {
        Self {
            spec,
            expected: spec.kind().expected(),
            trials: runs.len(),
            successes: runs.iter().filter(|run| run.is_correct()).count(),
        }
    }

    /// Success percentage in `[0, 100]`; 0 when no trials ran.
    pub fn success_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.successes as f64 / self.trials as f64 * 100.0
    }
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.1}% success rate", self.spec.kind(), self.success_rate())
    }
}

/// Config for trial `index`: the base seed offset by the trial index, or
/// unseeded if the base is unseeded.
fn trial_config(base: &RunConfig, index: usize) -> RunConfig {
    let mut config = base.clone();
    config.seed = base
        .seed
        .map(|seed| seed.wrapping_add((index as u64).wrapping_mul(SEED_STRIDE)));
    config
}

/// Runs `spec` `trials` times in parallel and counts correct classifications.
///
/// Trials share no state. Every run finishes before the report is built; the
/// first failure aborts the whole batch.
pub fn run_trials<S>(
    simulator: &S,
    spec: &OracleSpec,
    config: &RunConfig,
    trials: usize,
) -> Result<TrialReport, DeutschError>
where
    S: Simulator + Sync + ?Sized,
{
    let runs: Vec<OracleRun> = (0..trials)
        .into_par_iter()
        .map(|index| run_oracle(simulator, spec, &trial_config(config, index)))
        .collect::<Result<_, _>>()?;

    let report = TrialReport::from_runs(*spec, &runs);
    info!("{} over {} trials", report, trials);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::Circuit;
    use crate::oracles::OracleKind;
    use crate::simulation::MeasurementHistogram;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Alternates between a constant-looking and a balanced-looking histogram.
    struct Alternating {
        calls: AtomicUsize,
    }

    impl Simulator for Alternating {
        fn run(&self, _: &Circuit, _: &RunConfig) -> Result<MeasurementHistogram, DeutschError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let key = if call % 2 == 0 { "0" } else { "1" };
            MeasurementHistogram::from_counts(1, [(key, 8)])
        }
    }

    #[test]
    fn test_success_rate() -> Result<(), DeutschError> {
        let simulator = Alternating { calls: AtomicUsize::new(0) };
        let spec = OracleSpec::deutsch(OracleKind::Constant0)?;
        let report = run_trials(&simulator, &spec, &RunConfig::new().with_shots(8), 10)?;
        assert_eq!(report.trials, 10);
        assert_eq!(report.successes, 5);
        assert_eq!(report.success_rate(), 50.0);
        assert_eq!(report.to_string(), "constant_0: 50.0% success rate");
        Ok(())
    }

    #[test]
    fn test_zero_trials() -> Result<(), DeutschError> {
        let simulator = Alternating { calls: AtomicUsize::new(0) };
        let spec = OracleSpec::deutsch(OracleKind::Balanced01)?;
        let report = run_trials(&simulator, &spec, &RunConfig::new().with_shots(8), 0)?;
        assert_eq!(report.success_rate(), 0.0);
        Ok(())
    }

    #[test]
    fn test_trial_seeds_differ_and_repeat() {
        let base = RunConfig::new().with_seed(42);
        assert_eq!(trial_config(&base, 0).seed, Some(42));
        assert_ne!(trial_config(&base, 1).seed, trial_config(&base, 2).seed);
        assert_eq!(trial_config(&base, 7), trial_config(&base, 7));
        assert_eq!(trial_config(&RunConfig::new(), 3).seed, None);
    }
}
