//! The accumulator PRNG interface.
//!
//! The adapter treats the pool-based generator (Yarrow/Fortuna family)
//! as an opaque component: it mixes weighted entropy samples into
//! per-source pools and reseeds its output cipher once enough
//! estimated entropy has accumulated. This module defines exactly the
//! surface the adapter needs from it, plus a mock implementation for
//! tests and demonstration.

pub mod mock;

pub use mock::MockAccumulator;

use thiserror::Error;

/// Internal accumulator fault.
///
/// The adapter never interprets these; any accumulator failure is a
/// library programming error, not a transient condition.
#[derive(Debug, Error)]
#[error("accumulator internal failure")]
pub struct AccumulatorError;

/// Outcome of an output request.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The accumulator holds too little estimated entropy to produce
    /// output. Recoverable by reseeding.
    #[error("accumulator not yet seeded")]
    NotSeeded,
    /// Any other internal failure.
    #[error("accumulator internal failure")]
    Internal,
}

/// Seeding state reported by accumulator initialization.
///
/// `NotYetSeeded` is a legal starting state: the accumulator may come
/// up empty and only transition to seeded once enough weighted entropy
/// has been ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    /// The accumulator can serve output immediately.
    Seeded,
    /// The accumulator needs entropy before it can serve output.
    NotYetSeeded,
}

/// Which pool a forced reseed draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolLevel {
    /// The fast pool: frequent, low-threshold reseeds.
    Fast,
    /// The slow pool: conservative reseeds gated on the slow threshold.
    Slow,
}

/// An accumulator-assigned index for a registered entropy source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSlot(
    /// The raw slot index.
    pub usize,
);

impl SourceSlot {
    /// Returns the raw slot index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The operations the adapter requires from an accumulator PRNG.
///
/// Implementations are not assumed to be internally thread-safe; the
/// adapter serializes every call through its own lock.
pub trait Accumulator {
    /// One-time initialization of the pool state.
    fn init(&mut self) -> Result<InitState, AccumulatorError>;

    /// Registers a new entropy source and returns its slot.
    ///
    /// Slots are expected to be assigned sequentially from zero; the
    /// adapter treats any deviation as an unrecoverable contract
    /// violation.
    fn register_source(&mut self) -> Result<SourceSlot, AccumulatorError>;

    /// Mixes a sample into the pool for the given slot, crediting
    /// `entropy_bits` of estimated entropy.
    fn input(
        &mut self,
        slot: SourceSlot,
        bytes: &[u8],
        entropy_bits: usize,
    ) -> Result<(), AccumulatorError>;

    /// Fills `buf` with generator output.
    fn output(&mut self, buf: &mut [u8]) -> Result<(), OutputError>;

    /// Forces a reseed from the given pool regardless of thresholds.
    fn force_reseed(&mut self, level: PoolLevel) -> Result<(), AccumulatorError>;

    /// The slow-pool reseed threshold, in bits. The harvester sizes
    /// its device samples from this so one full sample can carry the
    /// pool across the threshold.
    fn slow_reseed_threshold_bits(&self) -> usize;

    /// Releases internal pool state. No calls may follow.
    fn finalize(&mut self);
}
