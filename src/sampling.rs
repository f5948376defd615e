use rand::Rng;
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};

use crate::error::YearsetError;

/// Which catalog events occurred in each sampled year.
///
/// One entry per year, each an ordered list of catalog indices with
/// duplicates allowed (the same event recurring within a year). A record is
/// returned from every fresh build so callers can persist it and replay the
/// same occurrence pattern against other catalogs sharing the hazard years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingRecord(pub Vec<Vec<usize>>);

impl SamplingRecord {
    pub fn n_years(&self) -> usize {
        self.0.len()
    }

    /// Total number of event occurrences across all years.
    pub fn total_events(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.0.iter().map(Vec::as_slice)
    }

    /// Check a reused record against the catalog size and the requested
    /// year count. Fails fast; a bad record is never truncated or padded.
    pub fn validate(&self, catalog_len: usize, n_years: usize) -> Result<(), YearsetError> {
        if self.n_years() != n_years {
            return Err(YearsetError::MalformedRecord {
                detail: format!("record covers {} years but {} were requested", self.n_years(), n_years),
            });
        }
        for (year, indices) in self.0.iter().enumerate() {
            if let Some(&bad) = indices.iter().find(|&&i| i >= catalog_len) {
                return Err(YearsetError::MalformedRecord {
                    detail: format!(
                        "year {year} references event {bad} but catalog has {catalog_len} events"
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Draw one event count per year from Poisson(lam).
///
/// `lam` must be positive and finite; the orchestrator defaults it to the
/// catalog's total frequency. `n_years == 0` and non-positive or non-finite
/// lam are `InvalidParameter`.
pub fn sample_event_counts(
    n_years: usize,
    lam: f64,
    rng: &mut impl Rng,
) -> Result<Vec<usize>, YearsetError> {
    if n_years == 0 {
        return Err(YearsetError::InvalidParameter { name: "n_years", value: 0.0 });
    }
    if !lam.is_finite() || lam <= 0.0 {
        return Err(YearsetError::InvalidParameter { name: "lam", value: lam });
    }
    let poisson = Poisson::new(lam)
        .map_err(|_| YearsetError::InvalidParameter { name: "lam", value: lam })?;
    Ok((0..n_years).map(|_| poisson.sample(rng) as usize).collect())
}

/// Prefix-sum table for frequency-weighted index draws with replacement.
///
/// Inverse-transform sampling: draw u uniformly in [0, total) and binary
/// search for the first cumulative weight above u. Zero-weight events occupy
/// an empty interval and can never be selected.
#[derive(Debug, Clone)]
pub struct CumulativeWeights {
    cumulative: Vec<f64>,
    total: f64,
}

impl CumulativeWeights {
    pub fn new(weights: &[f64]) -> Result<Self, YearsetError> {
        if weights.is_empty() {
            return Err(YearsetError::InvalidCatalog("no weights to sample from".to_string()));
        }
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut running = 0.0;
        for &w in weights {
            running += w;
            cumulative.push(running);
        }
        if running <= 0.0 {
            return Err(YearsetError::InvalidCatalog(
                "selection weights sum to zero".to_string(),
            ));
        }
        Ok(CumulativeWeights { cumulative, total: running })
    }

    /// Draw one index with probability weight[i] / total.
    pub fn draw(&self, rng: &mut impl Rng) -> usize {
        let u = rng.random_range(0.0..self.total);
        self.cumulative.partition_point(|&c| c <= u)
    }
}

/// Fill a sampling record: `counts[y]` weighted draws for year y.
pub fn sample_record(
    counts: &[usize],
    weights: &CumulativeWeights,
    rng: &mut impl Rng,
) -> SamplingRecord {
    SamplingRecord(
        counts
            .iter()
            .map(|&n| (0..n).map(|_| weights.draw(rng)).collect())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(42)
    }

    /// With lam=2.0 over 10k years the mean count must lie in [1.9, 2.1].
    #[test]
    fn poisson_count_long_run_mean_near_lam() {
        let mut rng = rng();
        let counts = sample_event_counts(10_000, 2.0, &mut rng).unwrap();
        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        assert!(
            (1.9..=2.1).contains(&mean),
            "mean annual count {mean:.3} outside [1.9, 2.1]"
        );
    }

    #[test]
    fn zero_years_rejected() {
        let err = sample_event_counts(0, 2.0, &mut rng()).unwrap_err();
        assert_eq!(err, YearsetError::InvalidParameter { name: "n_years", value: 0.0 });
    }

    #[test]
    fn non_positive_lam_rejected() {
        for lam in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            let result = sample_event_counts(10, lam, &mut rng());
            assert!(result.is_err(), "lam {lam} must be rejected");
        }
    }

    /// Empirical selection frequency must converge to weight[i] / Σweights.
    /// 100k draws over weights [0.2, 0.3, 0.5]; each share within ±0.01.
    #[test]
    fn weighted_draw_matches_normalized_weights() {
        let weights = CumulativeWeights::new(&[0.2, 0.3, 0.5]).unwrap();
        let mut rng = rng();
        let n = 100_000usize;
        let mut hits = [0usize; 3];
        for _ in 0..n {
            hits[weights.draw(&mut rng)] += 1;
        }
        for (i, expected) in [0.2, 0.3, 0.5].iter().enumerate() {
            let share = hits[i] as f64 / n as f64;
            assert!(
                (share - expected).abs() < 0.01,
                "event {i}: empirical share {share:.4}, expected {expected}"
            );
        }
    }

    #[test]
    fn zero_weight_event_never_drawn() {
        let weights = CumulativeWeights::new(&[0.5, 0.0, 0.5]).unwrap();
        let mut rng = rng();
        for _ in 0..10_000 {
            assert_ne!(weights.draw(&mut rng), 1, "zero-weight event was selected");
        }
    }

    #[test]
    fn all_zero_weights_rejected() {
        let err = CumulativeWeights::new(&[0.0, 0.0]).unwrap_err();
        assert!(matches!(err, YearsetError::InvalidCatalog(_)));
        assert!(CumulativeWeights::new(&[]).is_err());
    }

    #[test]
    fn record_entry_lengths_follow_counts() {
        let weights = CumulativeWeights::new(&[1.0, 1.0]).unwrap();
        let mut rng = rng();
        let record = sample_record(&[3, 0, 1], &weights, &mut rng);
        assert_eq!(record.n_years(), 3);
        assert_eq!(record.0[0].len(), 3);
        assert!(record.0[1].is_empty());
        assert_eq!(record.0[2].len(), 1);
        assert_eq!(record.total_events(), 4);
    }

    #[test]
    fn same_seed_same_record() {
        let weights = CumulativeWeights::new(&[0.1, 0.7, 0.2]).unwrap();
        let draw = || {
            let mut rng = rng();
            let counts = sample_event_counts(50, 3.0, &mut rng).unwrap();
            sample_record(&counts, &weights, &mut rng)
        };
        assert_eq!(draw(), draw(), "same seed must reproduce the record");
    }

    #[test]
    fn validate_rejects_year_count_mismatch() {
        let record = SamplingRecord(vec![vec![0], vec![1]]);
        let err = record.validate(5, 3).unwrap_err();
        assert!(err.to_string().contains("covers 2 years but 3 were requested"));
    }

    #[test]
    fn validate_rejects_out_of_bounds_index() {
        let record = SamplingRecord(vec![vec![0], vec![4, 7]]);
        let err = record.validate(5, 2).unwrap_err();
        assert!(err.to_string().contains("year 1 references event 7"));
    }

    #[test]
    fn record_json_round_trip() {
        let record = SamplingRecord(vec![vec![0, 2, 2], vec![], vec![1]]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, "[[0,2,2],[],[1]]");
        let back: SamplingRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
