//! Example: Deutsch's algorithm on the four single-bit oracles.
//!
//! Runs each oracle noiselessly, again under 1% depolarizing noise on H and
//! X gates, then estimates the success rate over 100 repeated runs.
//!
//! Pass a directory as the first argument to also write each noiseless
//! histogram there as `<oracle>_histogram.json`.

use deutsch::{
    NoiseModel, OracleKind, OracleSpec, RunConfig, StateVectorSimulator, deutsch_jozsa_circuit, run_oracle,
    run_trials,
};
use std::fs;
use std::path::PathBuf;

const TRIALS: usize = 100;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let out_dir = std::env::args().nth(1).map(PathBuf::from);
    if let Some(dir) = &out_dir {
        fs::create_dir_all(dir)?;
    }

    let simulator = StateVectorSimulator::new();
    let config = RunConfig::default();

    println!("--- Deutsch's Algorithm ---");
    println!("{}", deutsch_jozsa_circuit(&OracleSpec::deutsch(OracleKind::Balanced01)?));

    // --- Noiseless ---
    for kind in OracleKind::DEUTSCH {
        let spec = OracleSpec::deutsch(kind)?;
        let run = run_oracle(&simulator, &spec, &config)?;
        println!("\nTesting oracle: {}", kind);
        println!("Measurement counts: {}", run.histogram);
        println!("Function is: {}", run.classification);

        if let Some(dir) = &out_dir {
            let path = dir.join(format!("{}_histogram.json", kind));
            fs::write(&path, run.histogram.to_json()?)?;
            println!("Saved {}", path.display());
        }
    }

    // --- Noisy ---
    println!("\n--- Testing with Noise Model ---");
    let noisy = config.clone().with_noise(NoiseModel::depolarizing(0.01));
    for kind in OracleKind::DEUTSCH {
        let run = run_oracle(&simulator, &OracleSpec::deutsch(kind)?, &noisy)?;
        println!("Noisy {}: {} (counts: {})", kind, run.classification, run.histogram);
    }

    // --- Performance ---
    println!("\n--- Performance Testing ---");
    for kind in OracleKind::DEUTSCH {
        let report = run_trials(&simulator, &OracleSpec::deutsch(kind)?, &config, TRIALS)?;
        println!("{}", report);
    }

    Ok(())
}
