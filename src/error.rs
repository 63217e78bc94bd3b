//! Error types.
//!
//! [`ProbeError`] follows the failure kinds a scan or poll can hit. None of them
//! is fatal: [`Locator`](crate::Locator) turns them into "skip this candidate",
//! the poller into "stop draining for now". They exist so the code branches on
//! a kind instead of a raw errno, and so diagnostics can say what happened.

use std::io;

/// Failure while opening, probing, calibrating, or reading a device node.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The node does not exist. Expected; the `eventN` space is sparse.
    #[error("no such device")]
    ResourceUnavailable,

    /// The node exists but we may not open it.
    #[error("permission denied")]
    PermissionDenied,

    /// Any other open failure.
    #[error("open failed: {0}")]
    Io(#[source] io::Error),

    /// The device did not answer an identity or capability query.
    #[error("{query} query failed")]
    CapabilityQueryFailed { query: &'static str },

    /// Identity/capabilities matched but an axis range could not be read.
    #[error("axis {axis:#04x} could not be calibrated")]
    CalibrationFailed { axis: u16 },

    /// Reading the event stream failed.
    #[error("event read failed: {0}")]
    StreamRead(#[source] io::Error),

    /// The stream returned a record of the wrong size.
    #[error("short event read: got {got} bytes, expected {expected}")]
    ShortRead { got: usize, expected: usize },
}

impl ProbeError {
    /// Classify an OS error from opening a node.
    pub fn from_open(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            return ProbeError::ResourceUnavailable;
        }
        if err.kind() == io::ErrorKind::PermissionDenied {
            return ProbeError::PermissionDenied;
        }
        match err.raw_os_error() {
            Some(code) if is_unavailable_errno(code) => ProbeError::ResourceUnavailable,
            _ => ProbeError::Io(err),
        }
    }

    /// `true` for the kind a scan skips without a word.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ProbeError::ResourceUnavailable)
    }
}

// ENODEV/ENXIO: node present but the driver is gone.
#[cfg(target_os = "linux")]
fn is_unavailable_errno(code: i32) -> bool {
    matches!(code, libc::ENOENT | libc::ENODEV | libc::ENXIO)
}

#[cfg(not(target_os = "linux"))]
fn is_unavailable_errno(_code: i32) -> bool {
    false
}

/// Failure loading a [`LocatorConfig`](crate::LocatorConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] io::Error),

    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
