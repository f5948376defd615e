use serde::{Deserialize, Serialize};

use crate::error::YearsetError;

/// Immutable catalog of discrete stochastic events: per-event impact
/// magnitude and expected annual occurrence frequency, index-aligned.
///
/// Validated once at construction; every later stage can trust the arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCatalog {
    impacts: Vec<f64>,
    frequencies: Vec<f64>,
}

/// One catalog line as read from / written to NDJSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub impact: f64,
    pub frequency: f64,
}

impl EventCatalog {
    /// Build a catalog from parallel impact and frequency arrays.
    ///
    /// Rejects: empty input, length mismatch, non-finite or negative values,
    /// and a total frequency of zero (nothing to weight the selection with).
    /// Individual zero frequencies are allowed; such events are simply never
    /// selected.
    pub fn new(impacts: Vec<f64>, frequencies: Vec<f64>) -> Result<Self, YearsetError> {
        if impacts.is_empty() {
            return Err(YearsetError::InvalidCatalog("catalog has no events".to_string()));
        }
        if impacts.len() != frequencies.len() {
            return Err(YearsetError::InvalidCatalog(format!(
                "{} impacts but {} frequencies",
                impacts.len(),
                frequencies.len()
            )));
        }
        for (i, &impact) in impacts.iter().enumerate() {
            if !impact.is_finite() || impact < 0.0 {
                return Err(YearsetError::InvalidCatalog(format!(
                    "event {i} has impact {impact}; impacts must be finite and >= 0"
                )));
            }
        }
        for (i, &freq) in frequencies.iter().enumerate() {
            if !freq.is_finite() || freq < 0.0 {
                return Err(YearsetError::InvalidCatalog(format!(
                    "event {i} has frequency {freq}; frequencies must be finite and >= 0"
                )));
            }
        }
        if frequencies.iter().sum::<f64>() <= 0.0 {
            return Err(YearsetError::InvalidCatalog(
                "all event frequencies are zero".to_string(),
            ));
        }
        Ok(EventCatalog { impacts, frequencies })
    }

    pub fn from_entries(entries: &[CatalogEntry]) -> Result<Self, YearsetError> {
        EventCatalog::new(
            entries.iter().map(|e| e.impact).collect(),
            entries.iter().map(|e| e.frequency).collect(),
        )
    }

    pub fn to_entries(&self) -> Vec<CatalogEntry> {
        self.impacts
            .iter()
            .zip(&self.frequencies)
            .map(|(&impact, &frequency)| CatalogEntry { impact, frequency })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.impacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.impacts.is_empty()
    }

    pub fn impacts(&self) -> &[f64] {
        &self.impacts
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Sum of all event frequencies: the expected number of events per year,
    /// and the default Poisson intensity for fresh sampling.
    pub fn total_frequency(&self) -> f64 {
        self.frequencies.iter().sum()
    }

    /// Frequency-weighted expected annual impact: Σ impact·frequency.
    /// The long-run mean a corrected yearset is rescaled to.
    pub fn expected_annual_impact(&self) -> f64 {
        self.impacts.iter().zip(&self.frequencies).map(|(i, f)| i * f).sum()
    }
}
