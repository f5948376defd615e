//! Summary statistics over yearly-impact series.
//!
//! Everything downstream of the sampler (tables, exceedance views, ensemble
//! spreads) works from these summaries; the sampler itself never looks at
//! them.

/// Distribution summary of one yearly-impact series (or of any per-run
/// metric across an ensemble).
#[derive(Debug, Clone)]
pub struct SeriesStats {
    pub n: usize,
    pub min: f64,
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Linear-interpolated percentile summary. `None` for an empty slice.
pub fn series_stats(values: &[f64]) -> Option<SeriesStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();

    let interp = |p: f64| -> f64 {
        let h = p * (n - 1) as f64;
        let lo = h.floor() as usize;
        let hi = (lo + 1).min(n - 1);
        let frac = h - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    };

    let mean = sorted.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    Some(SeriesStats {
        n,
        min: sorted[0],
        p5: interp(0.05),
        p25: interp(0.25),
        p50: interp(0.50),
        p75: interp(0.75),
        p95: interp(0.95),
        max: sorted[n - 1],
        mean,
        std_dev: variance.sqrt(),
    })
}

/// Cross-run spread of an ensemble of independently sampled yearsets.
#[derive(Debug, Clone)]
pub struct EnsembleStats {
    pub runs: usize,
    /// Spread of per-run mean annual impact.
    pub mean_impact: SeriesStats,
    /// Spread of per-run worst single year.
    pub max_year: SeriesStats,
    /// Spread of per-run count of zero-impact years.
    pub empty_years: SeriesStats,
}

/// Collapse N independent runs' series into per-metric distributions.
///
/// Runs shorter than one year are skipped; fewer than 2 usable runs is not
/// enough to speak of a spread and yields `None`.
pub fn ensemble_stats(runs: &[Vec<f64>]) -> Option<EnsembleStats> {
    let usable: Vec<&Vec<f64>> = runs.iter().filter(|r| !r.is_empty()).collect();
    if usable.len() < 2 {
        return None;
    }

    let means: Vec<f64> =
        usable.iter().map(|r| r.iter().sum::<f64>() / r.len() as f64).collect();
    let maxima: Vec<f64> =
        usable.iter().map(|r| r.iter().copied().fold(f64::MIN, f64::max)).collect();
    let empties: Vec<f64> =
        usable.iter().map(|r| r.iter().filter(|&&x| x == 0.0).count() as f64).collect();

    Some(EnsembleStats {
        runs: usable.len(),
        mean_impact: series_stats(&means)?,
        max_year: series_stats(&maxima)?,
        empty_years: series_stats(&empties)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_known_series() {
        let series = vec![60.0, 70.0, 90.0, 260.0, 0.0, 270.0, 140.0, 0.0, 210.0, 190.0];
        let stats = series_stats(&series).unwrap();
        assert_eq!(stats.n, 10);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 270.0);
        assert!((stats.mean - 129.0).abs() < 1e-12);
        // Sorted: [0, 0, 60, 70, 90, 140, 190, 210, 260, 270]; p50 = (90+140)/2.
        assert!((stats.p50 - 115.0).abs() < 1e-12);
    }

    #[test]
    fn single_value_has_zero_spread() {
        let stats = series_stats(&[42.0]).unwrap();
        assert_eq!(stats.min, 42.0);
        assert_eq!(stats.max, 42.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn empty_series_yields_none() {
        assert!(series_stats(&[]).is_none());
    }

    #[test]
    fn ensemble_requires_two_runs() {
        assert!(ensemble_stats(&[vec![1.0, 2.0]]).is_none());
        assert!(ensemble_stats(&[vec![1.0], vec![]]).is_none());

        let stats = ensemble_stats(&[vec![1.0, 3.0], vec![2.0, 4.0]]).unwrap();
        assert_eq!(stats.runs, 2);
        assert!((stats.mean_impact.min - 2.0).abs() < 1e-12);
        assert!((stats.mean_impact.max - 3.0).abs() < 1e-12);
        assert!((stats.max_year.max - 4.0).abs() < 1e-12);
    }

    #[test]
    fn empty_year_count_is_tracked() {
        let stats = ensemble_stats(&[vec![0.0, 5.0, 0.0], vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(stats.empty_years.max, 2.0);
        assert_eq!(stats.empty_years.min, 0.0);
    }
}
