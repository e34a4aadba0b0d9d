//! Operating-system entropy harvesting.
//!
//! The harvester pulls fixed-size samples from the well-known OS
//! entropy devices and feeds them into the seeding path tagged as
//! [`EntropySource::OsRandomDevice`](crate::EntropySource::OsRandomDevice).
//! Which devices exist is decided once, at construction, by the
//! [`OsDevices`] strategy: platforms without entropy devices get an
//! empty strategy whose harvest always reports `false`.

mod device;

pub(crate) use device::read_device;

use std::path::{Path, PathBuf};

/// The entropy devices available to the harvester.
///
/// The strong device blocks until the kernel estimates enough fresh
/// entropy; the standard device never blocks. Either may be absent.
#[derive(Debug, Clone)]
pub struct OsDevices {
    strong: Option<PathBuf>,
    standard: Option<PathBuf>,
}

impl OsDevices {
    /// Returns the platform's device set: `/dev/random` and
    /// `/dev/urandom` on Unix, nothing elsewhere.
    pub fn detect() -> Self {
        #[cfg(unix)]
        {
            Self {
                strong: Some(PathBuf::from("/dev/random")),
                standard: Some(PathBuf::from("/dev/urandom")),
            }
        }
        #[cfg(not(unix))]
        {
            Self::none()
        }
    }

    /// A strategy with no devices; harvesting is a no-op.
    pub fn none() -> Self {
        Self {
            strong: None,
            standard: None,
        }
    }

    /// A strategy with explicit device paths, for tests and unusual
    /// deployments.
    pub fn with_paths(strong: Option<PathBuf>, standard: Option<PathBuf>) -> Self {
        Self { strong, standard }
    }

    /// The blocking high-quality device, if configured.
    pub fn strong(&self) -> Option<&Path> {
        self.strong.as_deref()
    }

    /// The non-blocking standard device, if configured.
    pub fn standard(&self) -> Option<&Path> {
        self.standard.as_deref()
    }

    /// Reads a full sample from the strong device into `buf`.
    pub(crate) fn read_strong(&self, buf: &mut [u8]) -> bool {
        match self.strong() {
            Some(path) => read_device(path, buf),
            None => false,
        }
    }

    /// Reads a full sample from the standard device into `buf`.
    pub(crate) fn read_standard(&self, buf: &mut [u8]) -> bool {
        match self.standard() {
            Some(path) => read_device(path, buf),
            None => false,
        }
    }
}
