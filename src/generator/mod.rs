//! The shared generator: lifecycle, seeding, and output serving.
//!
//! [`SharedRng`] wraps one accumulator instance behind a mutex and
//! exposes the seeding and output protocols around it. It replaces a
//! process-wide static with an explicitly constructed context object:
//! the owning library creates one instance and shares it, and test
//! harnesses can create as many independent instances as they need.
//!
//! # Locking
//!
//! Accumulators are not assumed to be internally thread-safe, so every
//! accumulator call runs under the mutex, not just the one-time
//! initialization and finalization transitions. Concurrent callers
//! during initialization block on the lock; whichever arrives second
//! observes the ready state and proceeds.

use crate::accumulator::{Accumulator, InitState, OutputError, PoolLevel, SourceSlot};
use crate::harvest::OsDevices;
use crate::source::{estimate, EntropySource, MAX_SOURCES};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// Errors surfaced by the generator.
///
/// Accumulator faults are never interpreted: anything the accumulator
/// reports collapses into [`RngError::Internal`], a library
/// programming error rather than a condition to retry.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RngError {
    /// The accumulator reported an internal failure, or output could
    /// not be produced even after the one permitted reseed attempt.
    #[error("internal crypto failure")]
    Internal,
    /// Output was requested before one-time initialization ran.
    #[error("generator not initialized")]
    NotInitialized,
    /// The generator was already torn down by `cleanup`.
    #[error("generator already finalized")]
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    NotInitialized,
    Ready,
    Finalized,
}

struct Inner<A> {
    accumulator: A,
    state: Lifecycle,
}

impl<A: Accumulator> Inner<A> {
    /// One-time setup: initialize the accumulator and register every
    /// entropy source in ordinal order. Idempotent once ready.
    fn ensure_init(&mut self) -> Result<(), RngError> {
        match self.state {
            Lifecycle::Ready => Ok(()),
            Lifecycle::Finalized => Err(RngError::Finalized),
            Lifecycle::NotInitialized => {
                // NotYetSeeded is a legal starting state; the pool
                // becomes seeded once enough entropy arrives.
                let seed_state = self.accumulator.init().map_err(|_| RngError::Internal)?;

                for expected in 0..MAX_SOURCES {
                    let slot = self
                        .accumulator
                        .register_source()
                        .map_err(|_| RngError::Internal)?;
                    // Slot layout is a structural contract with the
                    // accumulator; drift here silently misattributes
                    // every future entropy credit.
                    assert_eq!(
                        slot.index(),
                        expected,
                        "accumulator assigned source slot {} where {} was expected",
                        slot.index(),
                        expected
                    );
                }

                self.state = Lifecycle::Ready;
                tracing::info!(
                    sources = MAX_SOURCES,
                    seeded = matches!(seed_state, InitState::Seeded),
                    "generator initialized"
                );
                Ok(())
            }
        }
    }
}

/// A thread-safe seeding and output adapter around one accumulator.
pub struct SharedRng<A: Accumulator> {
    inner: Mutex<Inner<A>>,
    devices: OsDevices,
}

impl<A: Accumulator> SharedRng<A> {
    /// Creates an adapter over `accumulator` using the platform's
    /// entropy devices.
    pub fn new(accumulator: A) -> Self {
        Self::with_devices(accumulator, OsDevices::detect())
    }

    /// Creates an adapter with an explicit device strategy.
    pub fn with_devices(accumulator: A, devices: OsDevices) -> Self {
        Self {
            inner: Mutex::new(Inner {
                accumulator,
                state: Lifecycle::NotInitialized,
            }),
            devices,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<A>> {
        // A poisoned mutex means a panic mid-operation left the pool
        // state unknown; continuing would serve bytes from it.
        self.inner.lock().expect("generator mutex poisoned")
    }

    /// Runs one-time initialization. Idempotent: later calls return
    /// `Ok` without touching the accumulator. Fails with
    /// [`RngError::Finalized`] after [`cleanup`](Self::cleanup).
    pub fn init(&self) -> Result<(), RngError> {
        self.lock().ensure_init()
    }

    /// Feeds a caller-supplied entropy sample into the accumulator,
    /// credited per the estimation policy for `source`.
    ///
    /// Runs one-time initialization first if it has not happened yet.
    pub fn seed(&self, source: EntropySource, bytes: &[u8]) -> Result<(), RngError> {
        let mut inner = self.lock();
        inner.ensure_init()?;

        let entropy_bits = estimate(source, bytes.len());
        inner
            .accumulator
            .input(SourceSlot(source.slot_index()), bytes, entropy_bits)
            .map_err(|_| RngError::Internal)?;

        tracing::trace!(
            source = %source,
            len = bytes.len(),
            entropy_bits,
            "entropy sample ingested"
        );
        Ok(())
    }

    /// Fills `buf` with generator output.
    ///
    /// If the accumulator reports it is not yet seeded, forces exactly
    /// one slow-pool reseed and retries exactly once. There is no
    /// fallback to a weaker source: if trusted output cannot be
    /// produced, the call fails.
    pub fn rand(&self, buf: &mut [u8]) -> Result<(), RngError> {
        let mut inner = self.lock();
        match inner.state {
            Lifecycle::Ready => {}
            Lifecycle::NotInitialized => return Err(RngError::NotInitialized),
            Lifecycle::Finalized => return Err(RngError::Finalized),
        }

        match inner.accumulator.output(buf) {
            Ok(()) => Ok(()),
            Err(OutputError::NotSeeded) => {
                tracing::debug!("generator not seeded, forcing slow-pool reseed");
                inner
                    .accumulator
                    .force_reseed(PoolLevel::Slow)
                    .map_err(|_| RngError::Internal)?;
                inner.accumulator.output(buf).map_err(|_| RngError::Internal)
            }
            Err(OutputError::Internal) => Err(RngError::Internal),
        }
    }

    /// Harvests entropy from the OS devices and seeds the accumulator
    /// with it. Returns whether at least one device yielded a full
    /// sample that was accepted.
    ///
    /// Sample size is the accumulator's slow reseed threshold in
    /// bytes, so a single successful harvest can carry the pool across
    /// its reseed threshold. Harvest failure is never an error; the
    /// caller uses the boolean to decide whether to try other entropy
    /// strategies.
    pub fn os_seed(&self, strong: bool) -> bool {
        let sample_bytes = self.lock().accumulator.slow_reseed_threshold_bits() / 8;
        if sample_bytes == 0 {
            return false;
        }

        let mut harvested = false;
        let mut buf = vec![0u8; sample_bytes];

        // Strong read first: when both devices exist, the standard
        // read below then lands together with the strong sample and is
        // more likely to push the pool across its reseed threshold.
        if strong
            && self.devices.read_strong(&mut buf)
            && self.seed(EntropySource::OsRandomDevice, &buf).is_ok()
        {
            harvested = true;
        }

        if self.devices.read_standard(&mut buf)
            && self.seed(EntropySource::OsRandomDevice, &buf).is_ok()
        {
            harvested = true;
        }

        tracing::debug!(strong, harvested, sample_bytes, "os entropy harvest");
        harvested
    }

    /// Tears down the shared generator: finalizes the accumulator and
    /// rejects every later `init`/`seed`/`rand` call.
    ///
    /// Process-wide teardown, expected once at shutdown. Must not run
    /// concurrently with in-flight seed or output calls.
    pub fn cleanup(&self) {
        let mut inner = self.lock();
        match inner.state {
            Lifecycle::Finalized => {
                tracing::warn!("cleanup called on an already finalized generator");
            }
            Lifecycle::NotInitialized | Lifecycle::Ready => {
                inner.accumulator.finalize();
                inner.state = Lifecycle::Finalized;
                tracing::info!("generator finalized");
            }
        }
    }

    /// Consumes the adapter and returns the accumulator.
    ///
    /// Intended for tests that assert on a mock's recorded calls.
    pub fn into_accumulator(self) -> A {
        self.inner
            .into_inner()
            .expect("generator mutex poisoned")
            .accumulator
    }
}

impl<A: Accumulator> rand_core::RngCore for SharedRng<A> {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        // The infallible RngCore entry point: failure here is the
        // reseed-and-retry path exhausting, which must not be masked.
        self.rand(dest).expect("generator failed to produce output");
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.rand(dest).map_err(rand_core::Error::new)
    }
}
