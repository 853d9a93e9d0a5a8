//! Single-shot writes to sysfs attributes.

use crate::error::{Result, VibratorError};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// True when `path` can be opened read-write.
pub fn device_exists(path: &Path) -> bool {
    match OpenOptions::new().read(true).write(true).open(path) {
        Ok(_) => true,
        Err(e) => {
            log::debug!("open {} failed: {}", path.display(), e);
            false
        }
    }
}

/// Write `value` followed by a NUL byte to `path` in one write call.
///
/// A short write is reported as [`VibratorError::PartialWrite`] rather than
/// being completed, so the caller decides whether to try again.
pub fn write_value(path: &Path, value: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|source| VibratorError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let mut bytes = Vec::with_capacity(value.len() + 1);
    bytes.extend_from_slice(value.as_bytes());
    bytes.push(0);

    let written = loop {
        match file.write(&bytes) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => break other,
        }
    }
    .map_err(|source| VibratorError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    if written != bytes.len() {
        return Err(VibratorError::PartialWrite {
            path: path.to_path_buf(),
            written,
            expected: bytes.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_value_with_terminator() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("enable");
        std::fs::write(&path, b"").unwrap();

        write_value(&path, "250").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"250\0");
    }

    #[test]
    fn missing_file_is_open_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing");

        let err = write_value(&path, "1").unwrap_err();
        match err {
            VibratorError::Open { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // no create on write
        assert!(!path.exists());
    }

    #[test]
    fn device_exists_requires_openable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("activate");
        assert!(!device_exists(&path));

        std::fs::write(&path, b"0").unwrap();
        assert!(device_exists(&path));
    }
}
