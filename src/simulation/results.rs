// src/simulation/results.rs
use crate::core::DeutschError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Measurement outcomes of a circuit run, counted per bitstring.
///
/// Every key is exactly `width` characters from `{0,1}`. Zero counts are
/// never stored: a key is present iff it was observed at least once.
/// Keys are written with classical bit 0 as the rightmost character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHistogram")]
pub struct MeasurementHistogram {
    width: usize,
    counts: BTreeMap<String, u64>,
}

/// Unchecked wire form; converted through [`MeasurementHistogram::from_counts`].
#[derive(Deserialize)]
struct RawHistogram {
    width: usize,
    counts: BTreeMap<String, u64>,
}

impl TryFrom<RawHistogram> for MeasurementHistogram {
    type Error = DeutschError;

    fn try_from(raw: RawHistogram) -> Result<Self, Self::Error> {
        MeasurementHistogram::from_counts(raw.width, raw.counts)
    }
}

impl MeasurementHistogram {
    /// Creates an empty histogram over `width`-bit outcomes.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            counts: BTreeMap::new(),
        }
    }

    /// Builds a histogram from `(bitstring, count)` pairs. Repeated keys add up.
    ///
    /// # Errors
    /// `MalformedHistogram` if a key has the wrong length or a character
    /// other than `0`/`1`.
    pub fn from_counts<I, S>(width: usize, counts: I) -> Result<Self, DeutschError>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut histogram = Self::new(width);
        for (key, count) in counts {
            histogram.add(key.as_ref(), count)?;
        }
        Ok(histogram)
    }

    /// Adds `count` observations of `bitstring`.
    ///
    /// # Errors
    /// `MalformedHistogram` for a bad key, or if the count for `bitstring`
    /// would overflow `u64`. The histogram is unchanged on error.
    pub fn add(&mut self, bitstring: &str, count: u64) -> Result<(), DeutschError> {
        self.check_key(bitstring)?;
        if count == 0 {
            return Ok(());
        }
        let current = self.count(bitstring);
        let updated = current.checked_add(count).ok_or_else(|| {
            DeutschError::histogram(format!(
                "count for '{}' overflows: {} + {}",
                bitstring, current, count
            ))
        })?;
        self.counts.insert(bitstring.to_string(), updated);
        Ok(())
    }

    /// Records one observation of the classical outcome `bits`, where bit `i`
    /// of the integer is classical bit `i`.
    pub(crate) fn record_outcome(&mut self, bits: usize) {
        let key: String = (0..self.width)
            .rev()
            .map(|i| if (bits >> i) & 1 == 1 { '1' } else { '0' })
            .collect();
        *self.counts.entry(key).or_insert(0) += 1;
    }

    fn check_key(&self, bitstring: &str) -> Result<(), DeutschError> {
        if bitstring.len() != self.width {
            return Err(DeutschError::histogram(format!(
                "key '{}' has length {}, expected {}",
                bitstring,
                bitstring.len(),
                self.width
            )));
        }
        if let Some(c) = bitstring.chars().find(|c| *c != '0' && *c != '1') {
            return Err(DeutschError::histogram(format!(
                "key '{}' contains '{}', expected only 0 and 1",
                bitstring, c
            )));
        }
        Ok(())
    }

    /// Number of measured bits per outcome.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Count for `bitstring`, 0 if it was never observed.
    pub fn count(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Whether `bitstring` was observed at least once.
    pub fn contains(&self, bitstring: &str) -> bool {
        self.counts.contains_key(bitstring)
    }

    /// Total number of shots, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    /// Observed outcomes in ascending bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of distinct observed outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The outcome with the highest count, ties broken by the smaller bitstring.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.iter().fold(None, |best, (key, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((key, count)),
        })
    }

    /// Serializes to a JSON document `{"width": n, "counts": {...}}`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for MeasurementHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, count)) in self.iter().enumerate() {
            write!(f, "{}'{}': {}", if i > 0 { ", " } else { "" }, key, count)?;
        }
        write!(f, "}}")
    }
}
