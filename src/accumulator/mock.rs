//! Mock accumulator for testing and demonstration.
//!
//! Behaves like a pool-based generator at the interface level: it
//! mixes input through BLAKE3, credits estimated entropy, refuses
//! output until the slow threshold is crossed, and serves output from
//! a ChaCha20 stream once seeded. It also records every `input` and
//! `force_reseed` call so tests can assert on the adapter's behavior.
//!
//! Not a production PRNG. The pool dynamics are deliberately simple;
//! only the interface contract is faithful.

use super::{Accumulator, AccumulatorError, InitState, OutputError, PoolLevel, SourceSlot};
use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Default slow-pool reseed threshold, in bits.
pub const DEFAULT_SLOW_THRESHOLD_BITS: usize = 160;

/// A recorded `input` call.
#[derive(Debug, Clone)]
pub struct InputRecord {
    /// Slot the sample was credited to.
    pub slot: SourceSlot,
    /// Sample length in bytes.
    pub len: usize,
    /// Entropy credit the caller supplied.
    pub entropy_bits: usize,
}

/// Mock accumulator with plausible pool dynamics and call recording.
pub struct MockAccumulator {
    threshold_bits: usize,
    pool: blake3::Hasher,
    pool_bits: usize,
    rng: Option<ChaCha20Rng>,
    reseed_counter: u64,
    next_slot: usize,
    finalized: bool,
    inputs: Vec<InputRecord>,
    reseed_calls: usize,
    slot_offset: usize,
    reseed_effective: bool,
}

impl MockAccumulator {
    /// Creates an unseeded mock with the default slow threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_SLOW_THRESHOLD_BITS)
    }

    /// Creates an unseeded mock with a specific slow threshold.
    pub fn with_threshold(threshold_bits: usize) -> Self {
        Self {
            threshold_bits,
            pool: blake3::Hasher::new(),
            pool_bits: 0,
            rng: None,
            reseed_counter: 0,
            next_slot: 0,
            finalized: false,
            inputs: Vec::new(),
            reseed_calls: 0,
            slot_offset: 0,
            reseed_effective: true,
        }
    }

    /// Makes `register_source` hand out slots starting from a nonzero
    /// index, violating the sequential-assignment contract.
    pub fn with_nonsequential_slots(mut self) -> Self {
        self.slot_offset = 1;
        self
    }

    /// Makes `force_reseed` report success without actually seeding,
    /// so output stays `NotSeeded` after a reseed.
    pub fn with_ineffective_reseed(mut self) -> Self {
        self.reseed_effective = false;
        self
    }

    /// Returns every `input` call seen so far.
    pub fn inputs(&self) -> &[InputRecord] {
        &self.inputs
    }

    /// Returns how many `force_reseed` calls were issued.
    pub fn reseed_calls(&self) -> usize {
        self.reseed_calls
    }

    /// Returns how many sources were registered.
    pub fn registered_sources(&self) -> usize {
        self.next_slot
    }

    /// Returns true once the mock can serve output.
    pub fn is_seeded(&self) -> bool {
        self.rng.is_some()
    }

    fn do_reseed(&mut self) {
        let mut hasher = self.pool.clone();
        hasher.update(&self.reseed_counter.to_le_bytes());
        let seed = *hasher.finalize().as_bytes();
        self.rng = Some(ChaCha20Rng::from_seed(seed));
        self.reseed_counter += 1;
        self.pool_bits = 0;
    }
}

impl Default for MockAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for MockAccumulator {
    fn init(&mut self) -> Result<InitState, AccumulatorError> {
        if self.finalized {
            return Err(AccumulatorError);
        }
        Ok(if self.rng.is_some() {
            InitState::Seeded
        } else {
            InitState::NotYetSeeded
        })
    }

    fn register_source(&mut self) -> Result<SourceSlot, AccumulatorError> {
        if self.finalized {
            return Err(AccumulatorError);
        }
        let slot = SourceSlot(self.next_slot + self.slot_offset);
        self.next_slot += 1;
        Ok(slot)
    }

    fn input(
        &mut self,
        slot: SourceSlot,
        bytes: &[u8],
        entropy_bits: usize,
    ) -> Result<(), AccumulatorError> {
        if self.finalized {
            return Err(AccumulatorError);
        }
        self.pool.update(&(slot.index() as u64).to_le_bytes());
        self.pool.update(&(bytes.len() as u64).to_le_bytes());
        self.pool.update(bytes);
        self.pool_bits += entropy_bits;
        self.inputs.push(InputRecord {
            slot,
            len: bytes.len(),
            entropy_bits,
        });

        // Crossing the slow threshold seeds the generator, matching
        // the threshold-driven reseed of a real accumulator.
        if self.rng.is_none() && self.pool_bits >= self.threshold_bits {
            self.do_reseed();
        }
        Ok(())
    }

    fn output(&mut self, buf: &mut [u8]) -> Result<(), OutputError> {
        if self.finalized {
            return Err(OutputError::Internal);
        }
        match self.rng.as_mut() {
            Some(rng) => {
                rng.fill_bytes(buf);
                Ok(())
            }
            None => Err(OutputError::NotSeeded),
        }
    }

    fn force_reseed(&mut self, _level: PoolLevel) -> Result<(), AccumulatorError> {
        if self.finalized {
            return Err(AccumulatorError);
        }
        self.reseed_calls += 1;
        if self.reseed_effective {
            self.do_reseed();
        }
        Ok(())
    }

    fn slow_reseed_threshold_bits(&self) -> usize {
        self.threshold_bits
    }

    fn finalize(&mut self) {
        self.rng = None;
        self.pool = blake3::Hasher::new();
        self.pool_bits = 0;
        self.finalized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_not_seeded() {
        let mut accum = MockAccumulator::new();
        assert_eq!(accum.init().unwrap(), InitState::NotYetSeeded);

        let mut buf = [0u8; 16];
        assert!(matches!(accum.output(&mut buf), Err(OutputError::NotSeeded)));
    }

    #[test]
    fn test_sequential_slot_assignment() {
        let mut accum = MockAccumulator::new();
        for expected in 0..4 {
            let slot = accum.register_source().unwrap();
            assert_eq!(slot.index(), expected);
        }
    }

    #[test]
    fn test_seeds_after_crossing_threshold() {
        let mut accum = MockAccumulator::with_threshold(64);
        accum.input(SourceSlot(0), &[0xAA; 4], 32).unwrap();
        assert!(!accum.is_seeded());

        accum.input(SourceSlot(0), &[0xBB; 4], 32).unwrap();
        assert!(accum.is_seeded());

        let mut buf = [0u8; 16];
        accum.output(&mut buf).unwrap();
    }

    #[test]
    fn test_forced_reseed_seeds_below_threshold() {
        let mut accum = MockAccumulator::new();
        accum.input(SourceSlot(0), b"tiny", 2).unwrap();
        accum.force_reseed(PoolLevel::Slow).unwrap();

        let mut buf = [0u8; 16];
        accum.output(&mut buf).unwrap();
        assert_eq!(accum.reseed_calls(), 1);
    }

    #[test]
    fn test_ineffective_reseed_stays_unseeded() {
        let mut accum = MockAccumulator::new().with_ineffective_reseed();
        accum.force_reseed(PoolLevel::Slow).unwrap();

        let mut buf = [0u8; 16];
        assert!(matches!(accum.output(&mut buf), Err(OutputError::NotSeeded)));
    }

    #[test]
    fn test_different_input_different_output() {
        let mut a = MockAccumulator::with_threshold(8);
        let mut b = MockAccumulator::with_threshold(8);
        a.input(SourceSlot(0), &[0x01; 8], 64).unwrap();
        b.input(SourceSlot(0), &[0x02; 8], 64).unwrap();

        let mut out_a = [0u8; 32];
        let mut out_b = [0u8; 32];
        a.output(&mut out_a).unwrap();
        b.output(&mut out_b).unwrap();
        assert_ne!(out_a, out_b);
    }

    #[test]
    fn test_finalized_rejects_calls() {
        let mut accum = MockAccumulator::new();
        accum.finalize();

        assert!(accum.init().is_err());
        assert!(accum.register_source().is_err());
        assert!(accum.input(SourceSlot(0), b"x", 1).is_err());
        let mut buf = [0u8; 4];
        assert!(matches!(accum.output(&mut buf), Err(OutputError::Internal)));
    }
}
