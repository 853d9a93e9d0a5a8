//! Error types for the vibrator HAL

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VibratorError {
    /// None of the supported actuator mechanisms is present
    #[error("Vibrator device does not exist")]
    NotFound,

    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Fewer bytes reached the file than were requested; the caller may try again
    #[error("Short write to {}: {written} of {expected} bytes", .path.display())]
    PartialWrite {
        path: PathBuf,
        written: usize,
        expected: usize,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A force feedback ioctl or event write failed
    #[error("Force feedback {op} failed: {source}")]
    Protocol {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl VibratorError {
    /// Negative errno-style status code for hosts that speak C status codes.
    pub fn errno(&self) -> i32 {
        let code = match self {
            Self::NotFound => libc_codes::ENODEV,
            Self::PartialWrite { .. } => libc_codes::EAGAIN,
            Self::Config(_) => libc_codes::EINVAL,
            Self::Open { source, .. }
            | Self::Write { source, .. }
            | Self::Protocol { source, .. } => source.raw_os_error().unwrap_or(libc_codes::EIO),
        };
        -code
    }
}

// Values are identical across Linux architectures; kept local so the error type
// builds without the Linux-only dependencies.
mod libc_codes {
    pub const EIO: i32 = 5;
    pub const EAGAIN: i32 = 11;
    pub const ENODEV: i32 = 19;
    pub const EINVAL: i32 = 22;
}

pub type Result<T> = std::result::Result<T, VibratorError>;
