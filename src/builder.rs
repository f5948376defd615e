use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::aggregate::{Correction, aggregate_record, correction_factor};
use crate::catalog::EventCatalog;
use crate::error::YearsetError;
use crate::sampling::{CumulativeWeights, SamplingRecord, sample_event_counts, sample_record};
use crate::types::{TargetYears, Year};

/// Where the per-year event occurrences come from.
///
/// `Fresh` draws a new record: a Poisson count per year (lam defaults to the
/// catalog's total frequency) followed by frequency-weighted selection from
/// a ChaCha20 stream seeded with `seed`. `Reused` replays a record from an
/// earlier build verbatim and consumes no randomness at all, so occurrence
/// patterns stay correlated across catalogs sharing the same hazard years.
#[derive(Debug, Clone)]
pub enum SamplingSource {
    Fresh { lam: Option<f64>, seed: u64 },
    Reused(SamplingRecord),
}

/// One synthetic "sampled years" realization of a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Yearset {
    pub years: Vec<Year>,
    /// Aggregate impact per year, index-aligned with `years`.
    pub impacts: Vec<f64>,
    /// The record the impacts were aggregated from. Persist it to replay
    /// this realization or to correlate other catalogs with it.
    pub record: SamplingRecord,
    /// Present when the series was rescaled; carries both sides of the
    /// ratio so callers can report it without recomputing.
    pub correction: Option<Correction>,
}

impl Yearset {
    pub fn n_years(&self) -> usize {
        self.years.len()
    }

    pub fn mean_impact(&self) -> f64 {
        if self.impacts.is_empty() {
            0.0
        } else {
            self.impacts.iter().sum::<f64>() / self.impacts.len() as f64
        }
    }

    /// Implicit occurrence frequency of each sampled year, for consumers
    /// that treat the series as a list of synthetic events.
    pub fn frequency(&self) -> f64 {
        if self.years.is_empty() { 0.0 } else { 1.0 / self.years.len() as f64 }
    }
}

/// Orchestrates sampling, aggregation, and correction into a `Yearset`.
///
/// ```
/// use yearset::{EventCatalog, SamplingSource, YearsetBuilder};
///
/// let catalog = EventCatalog::new(vec![100.0, 2500.0], vec![1.5, 0.04])?;
/// let yearset = YearsetBuilder::new(catalog, 1000)
///     .source(SamplingSource::Fresh { lam: None, seed: 42 })
///     .build()?;
/// assert_eq!(yearset.n_years(), 1000);
/// # Ok::<(), yearset::YearsetError>(())
/// ```
#[derive(Debug, Clone)]
pub struct YearsetBuilder {
    catalog: EventCatalog,
    target_years: TargetYears,
    source: SamplingSource,
    apply_correction: bool,
}

impl YearsetBuilder {
    pub fn new(catalog: EventCatalog, target_years: impl Into<TargetYears>) -> Self {
        YearsetBuilder {
            catalog,
            target_years: target_years.into(),
            source: SamplingSource::Fresh { lam: None, seed: 0 },
            apply_correction: true,
        }
    }

    pub fn source(mut self, source: SamplingSource) -> Self {
        self.source = source;
        self
    }

    /// Shorthand for a fresh draw with the catalog-default lam.
    pub fn seed(mut self, seed: u64) -> Self {
        self.source = SamplingSource::Fresh { lam: None, seed };
        self
    }

    /// Replay an existing record instead of drawing a fresh one.
    pub fn reuse(mut self, record: SamplingRecord) -> Self {
        self.source = SamplingSource::Reused(record);
        self
    }

    /// Skip the mean-restoring rescale (default is to apply it).
    pub fn without_correction(mut self) -> Self {
        self.apply_correction = false;
        self
    }

    pub fn build(&self) -> Result<Yearset, YearsetError> {
        let n_years = self.target_years.n_years();
        if n_years == 0 {
            return Err(YearsetError::InvalidParameter { name: "n_years", value: 0.0 });
        }

        let record = match &self.source {
            SamplingSource::Fresh { lam, seed } => {
                let lam = lam.unwrap_or_else(|| self.catalog.total_frequency());
                let mut rng = ChaCha20Rng::seed_from_u64(*seed);
                let counts = sample_event_counts(n_years, lam, &mut rng)?;
                let weights = CumulativeWeights::new(self.catalog.frequencies())?;
                sample_record(&counts, &weights, &mut rng)
            }
            SamplingSource::Reused(record) => {
                record.validate(self.catalog.len(), n_years)?;
                record.clone()
            }
        };

        let mut impacts = aggregate_record(&self.catalog, &record)?;

        let correction = if self.apply_correction {
            let corr = correction_factor(&impacts, &self.catalog)?;
            for impact in &mut impacts {
                *impact *= corr.factor;
            }
            Some(corr)
        } else {
            None
        };

        Ok(Yearset { years: self.target_years.labels(), impacts, record, correction })
    }
}
