//! Accumulator RNG Adapter Library
//!
//! A seeding and output-serving layer in front of an accumulator-based
//! PRNG (Yarrow/Fortuna family). Provides a process-wide, thread-safe
//! source of random bytes with explicit, trust-weighted entropy
//! seeding.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! harvest ──┐
//!           ├─→ seed ─→ estimation policy ─→ accumulator input
//! callers ──┘
//!
//! callers ──→ rand ─→ accumulator output (forced reseed on demand)
//! ```
//!
//! # Design Principles
//!
//! - **No masked failures**: if trusted output cannot be produced,
//!   the call fails; there is no fallback to a weaker source
//! - **Trust-weighted seeding**: every sample is credited per a fixed
//!   per-source entropy table, never by raw length alone
//! - **One lock around everything**: every accumulator call is
//!   serialized, not just initialization
//! - **Soft harvesting**: a missing or misconfigured entropy device is
//!   an expected condition, reported as a boolean, never an error
//!
//! # Example
//!
//! ```no_run
//! use accumulator_rng::{
//!     accumulator::MockAccumulator,
//!     generator::SharedRng,
//!     EntropySource,
//! };
//!
//! let rng = SharedRng::new(MockAccumulator::new());
//! rng.init().unwrap();
//!
//! // Harvest OS entropy, then mix in some caller-supplied bytes.
//! if !rng.os_seed(true) {
//!     rng.seed(EntropySource::TimingJitter, &[7u8; 16]).unwrap();
//! }
//!
//! let mut key = [0u8; 32];
//! rng.rand(&mut key).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod accumulator;
pub mod generator;
pub mod harvest;
pub mod provider;
pub mod source;

// Re-export commonly used types at crate root
pub use accumulator::{Accumulator, InitState, OutputError, PoolLevel, SourceSlot};
pub use generator::{RngError, SharedRng};
pub use harvest::OsDevices;
pub use provider::RandomProvider;
pub use source::{estimate, EntropySource, MAX_SOURCES};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
