//! Trust-weighted entropy estimation.
//!
//! Raw sample length says nothing about how unpredictable a sample
//! actually is. The estimation policy converts length into an entropy
//! credit, in bits, using a fixed per-source trust table: OS device
//! output is credited at full density, legacy and third-party input is
//! discounted, timing jitter contributes a small fixed bound, and
//! externally asserted entropy is mixed in for diversity but never
//! credited at all.

use super::EntropySource;

/// Returns the entropy credit, in bits, for a sample of
/// `length_bytes` bytes from the given source.
///
/// The table is fixed and independent of runtime state.
pub fn estimate(source: EntropySource, length_bytes: usize) -> usize {
    match source {
        EntropySource::LegacyApi => length_bytes.saturating_mul(4),
        EntropySource::OsRandomDevice => length_bytes.saturating_mul(8),
        EntropySource::TrustedThirdParty => length_bytes.saturating_mul(4),
        EntropySource::TimingJitter => 2,
        EntropySource::ExternalProtocol => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_estimate_table() {
        for len in [0usize, 1, 16, 1024] {
            assert_eq!(estimate(EntropySource::LegacyApi, len), 4 * len);
            assert_eq!(estimate(EntropySource::OsRandomDevice, len), 8 * len);
            assert_eq!(estimate(EntropySource::TrustedThirdParty, len), 4 * len);
            assert_eq!(estimate(EntropySource::TimingJitter, len), 2);
            assert_eq!(estimate(EntropySource::ExternalProtocol, len), 0);
        }
    }

    #[test]
    fn test_estimate_saturates() {
        assert_eq!(estimate(EntropySource::OsRandomDevice, usize::MAX), usize::MAX);
    }

    proptest! {
        #[test]
        fn test_per_byte_sources_scale_linearly(len in 0usize..1_000_000) {
            prop_assert_eq!(estimate(EntropySource::LegacyApi, len), 4 * len);
            prop_assert_eq!(estimate(EntropySource::OsRandomDevice, len), 8 * len);
            prop_assert_eq!(estimate(EntropySource::TrustedThirdParty, len), 4 * len);
        }

        #[test]
        fn test_constant_sources_ignore_length(len in 0usize..1_000_000) {
            prop_assert_eq!(estimate(EntropySource::TimingJitter, len), 2);
            prop_assert_eq!(estimate(EntropySource::ExternalProtocol, len), 0);
        }
    }
}
