//! Synthetic event catalogs for demos, benches, and calibration checks.

use rand::Rng;
use rand_distr::{Distribution, LogNormal, Pareto};

use crate::catalog::{CatalogEntry, EventCatalog};
use crate::error::YearsetError;

pub enum SeverityModel {
    /// Log-normal impact; ln-space params.
    /// E[X] = exp(mu + sigma²/2).
    LogNormal { mu: f64, sigma: f64 },
    /// Pareto impact: `scale` = minimum value, `shape` = tail index α.
    /// E[X] = scale * shape / (shape − 1)  (requires shape > 1).
    Pareto { scale: f64, shape: f64 },
}

impl SeverityModel {
    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        match self {
            SeverityModel::LogNormal { mu, sigma } => {
                let dist = LogNormal::new(*mu, *sigma).expect("invalid LogNormal params");
                dist.sample(rng)
            }
            SeverityModel::Pareto { scale, shape } => {
                let dist = Pareto::new(*scale, *shape).expect("invalid Pareto params");
                dist.sample(rng)
            }
        }
    }
}

pub struct EventClass {
    pub name: &'static str,
    /// Expected occurrences per year for the class as a whole; split evenly
    /// across the generated events.
    pub annual_frequency: f64,
    pub n_events: usize,
    pub severity: SeverityModel,
}

/// Default class mix: two heavy-tailed catastrophe classes and one
/// attritional class.
/// Numeric values are PLACEHOLDER calibration.
pub fn default_event_classes() -> Vec<EventClass> {
    vec![
        EventClass {
            name: "windstorm",
            annual_frequency: 0.5, // PLACEHOLDER
            n_events: 400,
            severity: SeverityModel::Pareto { scale: 2_000_000.0, shape: 1.5 }, // PLACEHOLDER
        },
        EventClass {
            name: "flood",
            annual_frequency: 1.5, // PLACEHOLDER
            n_events: 600,
            severity: SeverityModel::Pareto { scale: 800_000.0, shape: 2.0 }, // PLACEHOLDER
        },
        EventClass {
            name: "attritional",
            annual_frequency: 12.0, // PLACEHOLDER ≈ monthly batch
            n_events: 1_000,
            severity: SeverityModel::LogNormal { mu: 11.5, sigma: 1.2 }, // PLACEHOLDER
        },
    ]
}

/// One generated catalog line plus its class tag (the tag is summary-only;
/// the catalog itself keeps no class structure).
pub struct GeneratedEvent {
    pub class: &'static str,
    pub entry: CatalogEntry,
}

/// Draw per-event impacts for every class. Each event carries frequency
/// `annual_frequency / n_events`, so the class keeps its overall rate and
/// every member is equally likely within it.
pub fn generate_events(classes: &[EventClass], rng: &mut impl Rng) -> Vec<GeneratedEvent> {
    let mut out = Vec::new();
    for class in classes {
        if class.n_events == 0 || class.annual_frequency <= 0.0 {
            continue;
        }
        let frequency = class.annual_frequency / class.n_events as f64;
        for _ in 0..class.n_events {
            out.push(GeneratedEvent {
                class: class.name,
                entry: CatalogEntry { impact: class.severity.sample(rng), frequency },
            });
        }
    }
    out
}

/// Generate a ready-to-sample catalog from the given class mix.
pub fn generate_catalog(
    classes: &[EventClass],
    rng: &mut impl Rng,
) -> Result<EventCatalog, YearsetError> {
    let entries: Vec<CatalogEntry> =
        generate_events(classes, rng).into_iter().map(|e| e.entry).collect();
    EventCatalog::from_entries(&entries)
}
