//! The provider surface exposed to the owning library.
//!
//! The capability set is closed and small, so it is a single trait
//! with exactly five operations rather than a dispatch hierarchy.
//! Callers hold the provider behind `Arc<dyn RandomProvider>` or a
//! concrete [`SharedRng`] and never see the accumulator underneath.

use crate::accumulator::Accumulator;
use crate::generator::{RngError, SharedRng};
use crate::source::EntropySource;

/// A process-wide source of random bytes with explicit seeding.
///
/// All operations are synchronous and blocking. `init` is idempotent;
/// `cleanup` is one-time and must not race in-flight calls.
pub trait RandomProvider: Send + Sync {
    /// One-time setup of the shared generator.
    fn init(&self) -> Result<(), RngError>;

    /// One-time teardown of the shared generator.
    fn cleanup(&self);

    /// Feeds a caller-supplied entropy sample.
    fn seed(&self, source: EntropySource, bytes: &[u8]) -> Result<(), RngError>;

    /// Fills `buf` with random output, reseeding once if needed.
    fn rand(&self, buf: &mut [u8]) -> Result<(), RngError>;

    /// Harvests OS entropy. Never fails; the boolean reports whether
    /// any entropy was actually harvested.
    fn os_seed(&self, strong: bool) -> bool;
}

impl<A: Accumulator + Send> RandomProvider for SharedRng<A> {
    fn init(&self) -> Result<(), RngError> {
        SharedRng::init(self)
    }

    fn cleanup(&self) {
        SharedRng::cleanup(self)
    }

    fn seed(&self, source: EntropySource, bytes: &[u8]) -> Result<(), RngError> {
        SharedRng::seed(self, source, bytes)
    }

    fn rand(&self, buf: &mut [u8]) -> Result<(), RngError> {
        SharedRng::rand(self, buf)
    }

    fn os_seed(&self, strong: bool) -> bool {
        SharedRng::os_seed(self, strong)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::MockAccumulator;
    use crate::harvest::OsDevices;
    use std::sync::Arc;

    fn provider() -> Arc<dyn RandomProvider> {
        Arc::new(SharedRng::with_devices(
            MockAccumulator::with_threshold(8),
            OsDevices::none(),
        ))
    }

    #[test]
    fn test_object_safe_dispatch() {
        let provider = provider();
        provider.init().unwrap();
        provider
            .seed(EntropySource::OsRandomDevice, &[0x42; 4])
            .unwrap();

        let mut buf = [0u8; 32];
        provider.rand(&mut buf).unwrap();
        assert_ne!(buf, [0u8; 32]);

        assert!(!provider.os_seed(true));
        provider.cleanup();
    }

    #[test]
    fn test_shared_across_threads() {
        let provider = provider();
        provider.init().unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let provider = Arc::clone(&provider);
                std::thread::spawn(move || {
                    provider
                        .seed(EntropySource::TimingJitter, &[i as u8; 8])
                        .unwrap();
                    let mut buf = [0u8; 16];
                    provider.rand(&mut buf).unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
