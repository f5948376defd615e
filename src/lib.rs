//! Yearset core library.
//!
//! Resamples an event catalog (per-event impact + annual frequency) into
//! synthetic "sampled years": a Poisson draw decides how many events hit
//! each year, frequency-weighted selection decides which, and an optional
//! correction pins the series mean to the catalog's expected annual impact.
//! The binaries (`src/main.rs`, `src/bin/`) are thin drivers around these
//! components.

pub mod aggregate;
pub mod analysis;
pub mod builder;
pub mod catalog;
pub mod error;
pub mod sampling;
pub mod synth;
pub mod types;

// --- Re-exports for ergonomic external use ---------------------------------

pub use aggregate::{Correction, aggregate_record, correction_factor};

pub use analysis::{EnsembleStats, SeriesStats, ensemble_stats, series_stats};

pub use builder::{SamplingSource, Yearset, YearsetBuilder};

pub use catalog::{CatalogEntry, EventCatalog};

pub use error::YearsetError;

pub use sampling::{CumulativeWeights, SamplingRecord, sample_event_counts, sample_record};

pub use types::{TargetYears, Year};
