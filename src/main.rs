use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use serde::Serialize;
use yearset::analysis::{self, SeriesStats};
use yearset::builder::{SamplingSource, Yearset, YearsetBuilder};
use yearset::catalog::{CatalogEntry, EventCatalog};
use yearset::sampling::SamplingRecord;
use yearset::types::Year;

#[derive(Serialize)]
struct YearImpact {
    year: Year,
    impact: f64,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut catalog_path: Option<String> = None;
    let mut years: usize = 100;
    let mut seed: u64 = 42;
    let mut lam: Option<f64> = None;
    let mut apply_correction = true;
    let mut record_path: Option<String> = None;
    let mut save_record_path: Option<String> = None;
    let mut output_path: Option<String> = None;
    let mut runs: Option<u64> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" => {
                i += 1;
                catalog_path = Some(args[i].clone());
            }
            "--years" => {
                i += 1;
                years = args[i].parse().expect("--years requires a positive integer");
            }
            "--seed" => {
                i += 1;
                seed = args[i].parse().expect("--seed requires a u64");
            }
            "--lam" => {
                i += 1;
                lam = Some(args[i].parse().expect("--lam requires a f64"));
            }
            "--no-correction" => apply_correction = false,
            "--record" => {
                i += 1;
                record_path = Some(args[i].clone());
            }
            "--save-record" => {
                i += 1;
                save_record_path = Some(args[i].clone());
            }
            "--output" => {
                i += 1;
                output_path = Some(args[i].clone());
            }
            "--runs" => {
                i += 1;
                runs = Some(args[i].parse().expect("--runs requires a positive integer"));
            }
            "--quiet" => quiet = true,
            other => {
                eprintln!("unknown argument: {other}");
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let Some(catalog_path) = catalog_path else {
        eprintln!("usage: yearset --catalog <catalog.ndjson> [--years N] [--seed S] [--lam L]");
        eprintln!("               [--no-correction] [--record <rec.json>] [--save-record <rec.json>]");
        eprintln!("               [--output <yearset.ndjson>] [--runs N] [--quiet]");
        std::process::exit(2);
    };

    let catalog = read_catalog(&catalog_path);

    if let Some(n) = runs {
        if record_path.is_some() {
            eprintln!("--runs draws fresh records; it cannot be combined with --record");
            std::process::exit(2);
        }
        run_ensemble(&catalog, years, seed, lam, apply_correction, n, quiet);
        return;
    }

    let mut builder = YearsetBuilder::new(catalog, years);
    builder = match record_path {
        Some(path) => builder.reuse(read_record(&path)),
        None => builder.source(SamplingSource::Fresh { lam, seed }),
    };
    if !apply_correction {
        builder = builder.without_correction();
    }

    let yearset = builder.build().unwrap_or_else(|e| {
        eprintln!("yearset: {e}");
        std::process::exit(1);
    });

    if let Some(corr) = &yearset.correction {
        eprintln!(
            "correction factor {:.6} (expected annual impact {:.3}, sampled mean {:.3})",
            corr.factor, corr.expected_annual_impact, corr.sampled_mean
        );
    }

    if let Some(path) = save_record_path {
        let file = File::create(&path).unwrap_or_else(|e| panic!("failed to create {path}: {e}"));
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &yearset.record).expect("failed to serialize record");
        writer.flush().expect("flush");
        if !quiet {
            eprintln!("sampling record → {path}");
        }
    }

    if let Some(path) = output_path {
        let file = File::create(&path).unwrap_or_else(|e| panic!("failed to create {path}: {e}"));
        let mut writer = BufWriter::new(file);
        for (&year, &impact) in yearset.years.iter().zip(&yearset.impacts) {
            serde_json::to_writer(&mut writer, &YearImpact { year, impact })
                .expect("failed to serialize year impact");
            writeln!(writer).expect("failed to write newline");
        }
    }

    if !quiet {
        print_yearset_summary(&yearset);
    }
}

fn read_catalog(path: &str) -> EventCatalog {
    let file = File::open(path).unwrap_or_else(|e| {
        eprintln!("failed to open catalog {path}: {e}");
        std::process::exit(1);
    });
    let entries: Vec<CatalogEntry> = BufReader::new(file)
        .lines()
        .map(|l| l.expect("failed to read catalog line"))
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(&l).unwrap_or_else(|e| panic!("bad catalog line: {e}")))
        .collect();
    EventCatalog::from_entries(&entries).unwrap_or_else(|e| {
        eprintln!("yearset: {e}");
        std::process::exit(1);
    })
}

fn read_record(path: &str) -> SamplingRecord {
    let file = File::open(path).unwrap_or_else(|e| {
        eprintln!("failed to open record {path}: {e}");
        std::process::exit(1);
    });
    serde_json::from_reader(BufReader::new(file)).unwrap_or_else(|e| {
        eprintln!("failed to parse record {path}: {e}");
        std::process::exit(1);
    })
}

fn print_yearset_summary(yearset: &Yearset) {
    let stats = match analysis::series_stats(&yearset.impacts) {
        Some(s) => s,
        None => return,
    };
    println!("\n=== Yearly impact ({} years, {} events sampled) ===", yearset.n_years(), yearset.record.total_events());
    print_stats_header();
    print_stats_row("impact", &stats);
}

fn print_stats_header() {
    println!(
        "{:>12} | {:>11} | {:>11} | {:>11} | {:>11} | {:>11} | {:>11} | {:>11}",
        "", "min", "p25", "p50", "p75", "p95", "max", "mean"
    );
    println!("{}", "-".repeat(12 + 8 * 14));
}

fn print_stats_row(label: &str, s: &SeriesStats) {
    println!(
        "{label:>12} | {:>11.2} | {:>11.2} | {:>11.2} | {:>11.2} | {:>11.2} | {:>11.2} | {:>11.2}",
        s.min, s.p25, s.p50, s.p75, s.p95, s.max, s.mean
    );
}

fn run_ensemble(
    catalog: &EventCatalog,
    years: usize,
    start_seed: u64,
    lam: Option<f64>,
    apply_correction: bool,
    n_runs: u64,
    quiet: bool,
) {
    use rayon::prelude::*;

    let all_series: Vec<Vec<f64>> = (0u64..n_runs)
        .into_par_iter()
        .filter_map(|i| {
            let mut builder = YearsetBuilder::new(catalog.clone(), years)
                .source(SamplingSource::Fresh { lam, seed: start_seed + i });
            if !apply_correction {
                builder = builder.without_correction();
            }
            match builder.build() {
                Ok(yearset) => Some(yearset.impacts),
                Err(e) => {
                    eprintln!("seed {}: {e}", start_seed + i);
                    None
                }
            }
        })
        .collect();

    if quiet {
        return;
    }

    match analysis::ensemble_stats(&all_series) {
        Some(stats) => {
            println!(
                "\n=== Ensemble spread (N={} runs, {} years each) ===",
                stats.runs, years
            );
            print_stats_header();
            print_stats_row("mean impact", &stats.mean_impact);
            print_stats_row("worst year", &stats.max_year);
            print_stats_row("empty years", &stats.empty_years);
        }
        None => eprintln!("Warning: distribution requires >= 2 successful runs"),
    }
}
