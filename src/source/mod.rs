//! Entropy source identification and trust weighting.
//!
//! Every sample fed into the accumulator is tagged with the source it
//! came from. The tag selects both the accumulator slot the sample is
//! credited to and the trust weight applied by the estimation policy.

mod estimate;

pub use estimate::estimate;

/// Where an entropy sample originated.
///
/// The set is closed: the ordinal of each variant doubles as the
/// accumulator's source-slot index, so variants must never be
/// reordered or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntropySource {
    /// Samples handed in through the legacy seeding API.
    LegacyApi = 0,
    /// Samples read from an operating-system entropy device.
    OsRandomDevice = 1,
    /// Samples asserted as random by a trusted third party.
    TrustedThirdParty = 2,
    /// Timing jitter measurements.
    TimingJitter = 3,
    /// Values received over an external protocol exchange.
    ExternalProtocol = 4,
}

/// Number of defined entropy sources; also the number of accumulator
/// slots registered at initialization.
pub const MAX_SOURCES: usize = 5;

impl EntropySource {
    /// All sources in ordinal order. Registration iterates this array,
    /// so its order defines the slot layout.
    pub const ALL: [EntropySource; MAX_SOURCES] = [
        EntropySource::LegacyApi,
        EntropySource::OsRandomDevice,
        EntropySource::TrustedThirdParty,
        EntropySource::TimingJitter,
        EntropySource::ExternalProtocol,
    ];

    /// Returns the accumulator slot index for this source.
    #[inline]
    pub fn slot_index(self) -> usize {
        self as usize
    }

    /// Converts a numeric wire tag into a source.
    ///
    /// # Panics
    ///
    /// Panics on a tag outside the defined set. An undefined tag is a
    /// broken internal contract with the caller, not a runtime
    /// condition to report and recover from.
    pub fn from_tag(tag: u32) -> Self {
        match tag {
            0 => EntropySource::LegacyApi,
            1 => EntropySource::OsRandomDevice,
            2 => EntropySource::TrustedThirdParty,
            3 => EntropySource::TimingJitter,
            4 => EntropySource::ExternalProtocol,
            other => panic!("undefined entropy source tag: {}", other),
        }
    }
}

impl std::fmt::Display for EntropySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntropySource::LegacyApi => "legacy-api",
            EntropySource::OsRandomDevice => "os-random-device",
            EntropySource::TrustedThirdParty => "trusted-third-party",
            EntropySource::TimingJitter => "timing-jitter",
            EntropySource::ExternalProtocol => "external-protocol",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_are_sequential() {
        for (i, source) in EntropySource::ALL.iter().enumerate() {
            assert_eq!(source.slot_index(), i);
        }
    }

    #[test]
    fn test_from_tag_round_trip() {
        for source in EntropySource::ALL {
            assert_eq!(EntropySource::from_tag(source.slot_index() as u32), source);
        }
    }

    #[test]
    #[should_panic(expected = "undefined entropy source tag")]
    fn test_from_tag_undefined_aborts() {
        let _ = EntropySource::from_tag(MAX_SOURCES as u32);
    }
}
