//! Example: Deutsch–Jozsa with a 3-bit input register.
//!
//! A single batch of shots separates the constant oracles (only `000` is
//! ever observed) from the balanced one. An optional first argument sets the
//! arity; an optional second argument is a JSON `RunConfig`.

use deutsch::{OracleKind, OracleSpec, RunConfig, StateVectorSimulator, deutsch_jozsa_circuit, run_oracle};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let n: usize = match args.next() {
        Some(arg) => arg.parse()?,
        None => 3,
    };
    let config = match args.next() {
        Some(json) => RunConfig::from_json(&json)?,
        None => RunConfig::default(),
    };

    println!("--- Deutsch-Jozsa Algorithm (n={}) ---", n);
    let simulator = StateVectorSimulator::new();

    for kind in OracleKind::DEUTSCH_JOZSA {
        let spec = OracleSpec::new(kind, n)?;
        if kind == OracleKind::Balanced {
            println!("{}", deutsch_jozsa_circuit(&spec));
        }
        let run = run_oracle(&simulator, &spec, &config)?;
        println!("DJ {}: {}", kind, run.classification);
        if let Some((bits, count)) = run.histogram.most_frequent() {
            println!("  most frequent outcome: {} ({} of {})", bits, count, run.histogram.total());
        }
    }

    Ok(())
}
