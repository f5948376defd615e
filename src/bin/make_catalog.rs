use std::env;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use yearset::synth::{default_event_classes, generate_events};

fn main() {
    let seed: u64 = env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(42);

    let classes = default_event_classes();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let events = generate_events(&classes, &mut rng);

    // Write NDJSON to stdout.
    for event in &events {
        println!("{}", serde_json::to_string(&event.entry).expect("serialisation failed"));
    }

    // Per-class summary to stderr.
    let total_eai: f64 = events.iter().map(|e| e.entry.impact * e.entry.frequency).sum();
    eprintln!(
        "make_catalog: seed {seed}, {} events, expected annual impact {total_eai:.1}",
        events.len()
    );
    for class in &classes {
        let members: Vec<_> = events.iter().filter(|e| e.class == class.name).collect();
        if members.is_empty() {
            continue;
        }
        let mean_impact =
            members.iter().map(|e| e.entry.impact).sum::<f64>() / members.len() as f64;
        let eai: f64 = members.iter().map(|e| e.entry.impact * e.entry.frequency).sum();
        eprintln!(
            "  class={:<12}  events={:>5}  freq/yr={:>5.1}  mean_impact={mean_impact:>12.1}  eai={eai:>12.1}",
            class.name,
            members.len(),
            class.annual_frequency,
        );
    }
}
