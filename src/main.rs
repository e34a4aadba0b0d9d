//! Accumulator RNG Adapter CLI
//!
//! Command-line interface for testing and demonstrating the seeding
//! and output adapter against the mock accumulator.

use accumulator_rng::{accumulator::MockAccumulator, generator::SharedRng, EntropySource};
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser)]
#[command(version, about = "Demonstrates the accumulator RNG adapter")]
struct Args {
    /// Number of random bytes to generate.
    #[arg(long, default_value_t = 32)]
    bytes: usize,

    /// Harvest from the blocking high-quality device first.
    #[arg(long)]
    strong: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Accumulator RNG Adapter v{}", accumulator_rng::VERSION);
    info!("This is a demonstration using the mock accumulator backend");

    let rng = SharedRng::new(MockAccumulator::new());

    if let Err(e) = rng.init() {
        eprintln!("Failed to initialize generator: {}", e);
        std::process::exit(1);
    }

    // Harvest OS entropy; fall back to timing jitter samples if the
    // platform exposes no entropy devices.
    if rng.os_seed(args.strong) {
        info!(strong = args.strong, "OS entropy harvested");
    } else {
        warn!("No OS entropy harvested, mixing timing jitter samples");
        for _ in 0..8 {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default();
            let sample = now.subsec_nanos().to_le_bytes();
            if let Err(e) = rng.seed(EntropySource::TimingJitter, &sample) {
                warn!("Jitter seeding failed: {}", e);
                break;
            }
        }
    }

    let mut output = vec![0u8; args.bytes];
    match rng.rand(&mut output) {
        Ok(()) => {
            println!(
                "Random bytes: {}",
                output
                    .iter()
                    .map(|b| format!("{:02x}", b))
                    .collect::<String>()
            );
        }
        Err(e) => {
            eprintln!("Failed to generate random bytes: {}", e);
            std::process::exit(1);
        }
    }

    rng.cleanup();
    info!("Done");
}
