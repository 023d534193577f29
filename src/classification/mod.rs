// src/classification/mod.rs

//! Decides whether a measured oracle is constant or balanced.
//!
//! Two policies exist and are kept apart:
//!
//! * [`ClassificationPolicy::Majority`] for Deutsch's single-bit case:
//!   constant iff `"0"` was observed and strictly outnumbers `"1"`.
//! * [`ClassificationPolicy::ExactZero`] for Deutsch–Jozsa with `n >= 2`:
//!   constant iff the all-zero string is the only observed outcome.
//!
//! `ExactZero` has no noise tolerance. A single stray outcome under noise
//! turns a constant oracle into `Balanced`, where `Majority` would not.
//!
//! Classification is total: every histogram maps to a label. An empty
//! histogram is `Balanced` under `Majority` (no `"0"` was seen) but
//! `Constant` under `ExactZero`, where no observed key differs from the
//! all-zero string.

use crate::simulation::MeasurementHistogram;
use log::warn;
use std::fmt;

/// Outcome of classifying an oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// f has the same value on every input.
    Constant,
    /// f is 0 on half of the inputs and 1 on the other half.
    Balanced,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Constant => write!(f, "constant"),
            Classification::Balanced => write!(f, "balanced"),
        }
    }
}

/// Decision rule applied to a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationPolicy {
    /// Single-bit majority with a strict `>`; ties go to `Balanced`.
    Majority,
    /// Every observed key must equal `"0"*n`. Holds vacuously when nothing
    /// was observed.
    ExactZero,
}

impl ClassificationPolicy {
    /// `Majority` for one measured bit, `ExactZero` otherwise.
    pub fn for_width(width: usize) -> Self {
        if width == 1 {
            ClassificationPolicy::Majority
        } else {
            ClassificationPolicy::ExactZero
        }
    }
}

/// Classifies a histogram with the policy its width selects.
pub fn classify(histogram: &MeasurementHistogram) -> Classification {
    classify_with(ClassificationPolicy::for_width(histogram.width()), histogram)
}

/// Classifies a histogram with an explicit policy.
pub fn classify_with(policy: ClassificationPolicy, histogram: &MeasurementHistogram) -> Classification {
    match policy {
        ClassificationPolicy::Majority => classify_majority(histogram),
        ClassificationPolicy::ExactZero => classify_exact_zero(histogram),
    }
}

fn classify_majority(histogram: &MeasurementHistogram) -> Classification {
    let zeros = histogram.count("0");
    let ones = histogram.count("1");
    if zeros == ones && zeros > 0 {
        warn!("tied single-bit histogram {} resolved as balanced", histogram);
    }
    if histogram.contains("0") && zeros > ones {
        Classification::Constant
    } else {
        Classification::Balanced
    }
}

fn classify_exact_zero(histogram: &MeasurementHistogram) -> Classification {
    let all_zero = "0".repeat(histogram.width());
    if histogram.iter().all(|(key, _)| key == all_zero) {
        return Classification::Constant;
    }
    if histogram.contains(&all_zero) {
        warn!(
            "all-zero outcome observed alongside {} other outcome(s); exact policy reports balanced",
            histogram.len() - 1
        );
    }
    Classification::Balanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DeutschError;
    use rstest::rstest;

    fn histogram(width: usize, counts: &[(&str, u64)]) -> Result<MeasurementHistogram, DeutschError> {
        MeasurementHistogram::from_counts(width, counts.iter().copied())
    }

    #[rstest]
    #[case(&[("0", 1024)], Classification::Constant)]
    #[case(&[("0", 1)], Classification::Constant)]
    #[case(&[("1", 1024)], Classification::Balanced)]
    #[case(&[], Classification::Balanced)]
    #[case(&[("0", 5), ("1", 5)], Classification::Balanced)]
    #[case(&[("0", 513), ("1", 511)], Classification::Constant)]
    #[case(&[("0", 12), ("1", 1012)], Classification::Balanced)]
    fn test_single_bit(#[case] counts: &[(&str, u64)], #[case] expected: Classification) -> Result<(), DeutschError> {
        assert_eq!(classify(&histogram(1, counts)?), expected);
        Ok(())
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(8)]
    fn test_all_zero_is_constant(#[case] n: usize) -> Result<(), DeutschError> {
        let zeros = "0".repeat(n);
        assert_eq!(classify(&histogram(n, &[(zeros.as_str(), 1024)])?), Classification::Constant);
        Ok(())
    }

    #[test]
    fn test_exact_policy_rejects_any_stray_outcome() -> Result<(), DeutschError> {
        assert_eq!(
            classify(&histogram(3, &[("000", 500), ("101", 524)])?),
            Classification::Balanced
        );
        assert_eq!(
            classify(&histogram(3, &[("000", 1023), ("100", 1)])?),
            Classification::Balanced
        );
        assert_eq!(classify(&histogram(3, &[("001", 1024)])?), Classification::Balanced);
        Ok(())
    }

    #[test]
    fn test_empty_histogram_depends_on_policy() {
        // No key differs from "000", so the exact rule holds vacuously.
        assert_eq!(classify(&MeasurementHistogram::new(3)), Classification::Constant);
        assert_eq!(classify(&MeasurementHistogram::new(1)), Classification::Balanced);
        assert_eq!(
            classify_with(ClassificationPolicy::ExactZero, &MeasurementHistogram::new(1)),
            Classification::Constant
        );
    }

    #[test]
    fn test_policies_disagree_under_noise() -> Result<(), DeutschError> {
        // A single-bit histogram with a little noise: majority still says constant,
        // the exact rule does not.
        let noisy = histogram(1, &[("0", 1010), ("1", 14)])?;
        assert_eq!(classify_with(ClassificationPolicy::Majority, &noisy), Classification::Constant);
        assert_eq!(classify_with(ClassificationPolicy::ExactZero, &noisy), Classification::Balanced);
        Ok(())
    }

    #[test]
    fn test_policy_for_width() {
        assert_eq!(ClassificationPolicy::for_width(1), ClassificationPolicy::Majority);
        assert_eq!(ClassificationPolicy::for_width(2), ClassificationPolicy::ExactZero);
        assert_eq!(ClassificationPolicy::for_width(0), ClassificationPolicy::ExactZero);
    }

    #[test]
    fn test_display() {
        assert_eq!(Classification::Constant.to_string(), "constant");
        assert_eq!(Classification::Balanced.to_string(), "balanced");
    }
}
