//! Raw entropy-device reads.
//!
//! Every failure here is soft: a missing device, a permission error,
//! a misconfigured path, or a short read all yield `false` and no
//! entropy credit. Failing to harvest is an expected condition, not a
//! fault.

use std::path::Path;

/// Reads a full buffer from an entropy device.
///
/// Opens the path read-only with close-on-exec, verifies via the open
/// file's status that it is not a plain regular file, then loop-reads
/// until the buffer is full. Returns whether the buffer was filled.
#[cfg(unix)]
pub(crate) fn read_device(path: &Path, buf: &mut [u8]) -> bool {
    use std::fs::OpenOptions;
    use std::io::Read;
    use std::os::unix::fs::OpenOptionsExt;

    let file = match OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_CLOEXEC)
        .open(path)
    {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "entropy device open failed");
            return false;
        }
    };

    // A plain regular file at a device path means misconfiguration;
    // its contents must never be credited as entropy.
    match file.metadata() {
        Ok(meta) if meta.file_type().is_file() => {
            tracing::debug!(path = %path.display(), "entropy device path is a regular file");
            return false;
        }
        Ok(_) => {}
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "entropy device stat failed");
            return false;
        }
    }

    let mut filled = 0;
    while filled < buf.len() {
        match (&file).read(&mut buf[filled..]) {
            Ok(0) => {
                tracing::debug!(path = %path.display(), "entropy device hit end of stream");
                return false;
            }
            Ok(n) => filled += n,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "entropy device read failed");
                return false;
            }
        }
    }
    true
}

#[cfg(not(unix))]
pub(crate) fn read_device(_path: &Path, _buf: &mut [u8]) -> bool {
    false
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_regular_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", name, std::process::id()));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&[0u8; 64]).unwrap();
        path
    }

    #[test]
    fn test_reads_full_buffer_from_char_device() {
        let mut buf = [0xFFu8; 32];
        assert!(read_device(Path::new("/dev/zero"), &mut buf));
        assert_eq!(buf, [0u8; 32]);
    }

    #[test]
    fn test_missing_device_is_soft_failure() {
        let mut buf = [0u8; 8];
        assert!(!read_device(Path::new("/dev/no-such-entropy-device"), &mut buf));
    }

    #[test]
    fn test_regular_file_is_rejected() {
        let path = temp_regular_file("accumulator-rng-regular");
        let mut buf = [0u8; 8];
        assert!(!read_device(&path, &mut buf));
        std::fs::remove_file(&path).ok();
    }
}
