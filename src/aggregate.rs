use serde::Serialize;

use crate::catalog::EventCatalog;
use crate::error::YearsetError;
use crate::sampling::SamplingRecord;

/// Sum the catalog impacts selected for each year.
///
/// Deterministic: no randomness, no state. An empty year sums to 0.0 and a
/// duplicated index is counted once per occurrence (the same event striking
/// twice). Out-of-bounds indices are reported, never skipped.
pub fn aggregate_record(
    catalog: &EventCatalog,
    record: &SamplingRecord,
) -> Result<Vec<f64>, YearsetError> {
    let impacts = catalog.impacts();
    record
        .iter()
        .enumerate()
        .map(|(year, indices)| {
            indices
                .iter()
                .map(|&i| {
                    impacts.get(i).copied().ok_or_else(|| YearsetError::MalformedRecord {
                        detail: format!(
                            "year {year} references event {i} but catalog has {} events",
                            impacts.len()
                        ),
                    })
                })
                .sum()
        })
        .collect()
}

/// Scalar rescaling that pins a sampled series' mean to the catalog's
/// expected annual impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correction {
    /// expected_annual_impact / sampled_mean; multiplies every series entry.
    pub factor: f64,
    pub expected_annual_impact: f64,
    pub sampled_mean: f64,
}

/// Compute the correction for a sampled series against its source catalog.
///
/// Sampling finitely many years biases the series mean away from the
/// catalog's Σ impact·frequency; multiplying by the returned factor restores
/// it exactly. A zero-mean series (every sampled year empty) has no defined
/// factor and is reported as `DegenerateSeries` instead of dividing through
/// to a NaN or infinity.
pub fn correction_factor(
    series: &[f64],
    catalog: &EventCatalog,
) -> Result<Correction, YearsetError> {
    if series.is_empty() {
        return Err(YearsetError::DegenerateSeries);
    }
    let sampled_mean = series.iter().sum::<f64>() / series.len() as f64;
    if sampled_mean == 0.0 {
        return Err(YearsetError::DegenerateSeries);
    }
    let expected_annual_impact = catalog.expected_annual_impact();
    Ok(Correction {
        factor: expected_annual_impact / sampled_mean,
        expected_annual_impact,
        sampled_mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_catalog() -> EventCatalog {
        let impacts: Vec<f64> = (1..=10).map(|i| (i * 10) as f64).collect();
        EventCatalog::new(impacts, vec![0.2; 10]).unwrap()
    }

    #[test]
    fn empty_year_sums_to_zero() {
        let catalog = step_catalog();
        let record = SamplingRecord(vec![vec![], vec![3], vec![]]);
        let series = aggregate_record(&catalog, &record).unwrap();
        assert_eq!(series, vec![0.0, 40.0, 0.0]);
    }

    #[test]
    fn duplicate_indices_count_each_occurrence() {
        let catalog = step_catalog();
        let record = SamplingRecord(vec![vec![9, 9, 5]]);
        let series = aggregate_record(&catalog, &record).unwrap();
        assert_eq!(series, vec![260.0]);
    }

    #[test]
    fn out_of_bounds_index_reported() {
        let catalog = step_catalog();
        let record = SamplingRecord(vec![vec![0], vec![10]]);
        let err = aggregate_record(&catalog, &record).unwrap_err();
        assert!(err.to_string().contains("year 1 references event 10"));
    }

    #[test]
    fn factor_restores_catalog_mean() {
        let catalog = step_catalog();
        let series = vec![60.0, 70.0, 90.0, 260.0, 0.0, 270.0, 140.0, 0.0, 210.0, 190.0];
        let corr = correction_factor(&series, &catalog).unwrap();
        assert!((corr.sampled_mean - 129.0).abs() < 1e-12);
        assert!((corr.expected_annual_impact - 110.0).abs() < 1e-12);
        assert!((corr.factor - 110.0 / 129.0).abs() < 1e-12);

        let corrected_mean: f64 =
            series.iter().map(|x| x * corr.factor).sum::<f64>() / series.len() as f64;
        assert!((corrected_mean - 110.0).abs() < 1e-9);
    }

    #[test]
    fn zero_mean_series_is_degenerate() {
        let catalog = step_catalog();
        assert_eq!(
            correction_factor(&[0.0, 0.0, 0.0], &catalog).unwrap_err(),
            YearsetError::DegenerateSeries
        );
        assert_eq!(correction_factor(&[], &catalog).unwrap_err(), YearsetError::DegenerateSeries);
    }
}
