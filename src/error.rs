//! Error types for yearset construction.

use thiserror::Error;

/// Errors surfaced while validating inputs or building a yearset.
///
/// Every error is detected at the boundary of the first component that can
/// observe the invalid condition and returned immediately. Nothing is
/// retried internally; resampling on failure is the caller's decision.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum YearsetError {
    /// Empty catalog, mismatched array lengths, or no positive frequency
    /// to weight the event selection with.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// A scalar input outside its valid range (non-positive lam,
    /// zero target years, ...).
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// The sampled series has zero mean, so the correction factor is
    /// undefined. Either resample or build without correction.
    #[error("sampled yearly impacts have zero mean; correction factor is undefined")]
    DegenerateSeries,

    /// A reused sampling record that does not fit the catalog or the
    /// requested years. Reported before any aggregation happens.
    #[error("malformed sampling record: {detail}")]
    MalformedRecord { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = YearsetError::InvalidParameter { name: "lam", value: -1.0 };
        assert_eq!(err.to_string(), "invalid parameter lam: -1");

        let err = YearsetError::MalformedRecord {
            detail: "year 3 references event 12 but catalog has 10 events".to_string(),
        };
        assert!(err.to_string().contains("year 3"));
    }
}
