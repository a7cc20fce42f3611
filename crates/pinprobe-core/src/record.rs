//! Raw per-pin records and the record source seam
//!
//! The kernel's pin-control debug interface is an unstable external
//! contract; everything above it consumes only [`RawPinRecord`]. The
//! [`RecordSource`] trait is the seam the debugfs reader (and test
//! doubles) implement.

use std::path::PathBuf;

use thiserror::Error;

/// One unparsed per-pin line from the kernel debug interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPinRecord {
    /// SoC pad name the record was looked up under
    pub soc_name: String,
    /// The record exactly as the kernel printed it
    pub raw_text: String,
    /// File the record was read from
    pub source_path: PathBuf,
}

/// Errors a record source can report
#[derive(Debug, Error)]
pub enum SourceError {
    /// The debug hierarchy is absent or not mounted
    #[error("pin-control debug interface unavailable at {path}; mount debugfs (mount -t debugfs none /sys/kernel/debug) and retry")]
    Unavailable {
        /// Expected mount location
        path: String,
    },

    /// The calling process may not read the debug hierarchy
    #[error("permission denied reading {path}; rerun with elevated privileges")]
    PermissionDenied {
        /// Path the read failed on
        path: String,
    },

    /// The hierarchy exists but no controller exports this pad
    #[error("no pin controller exports pin '{soc_name}'")]
    PinNotExported {
        /// Pad name that was looked up
        soc_name: String,
    },

    /// Any other I/O failure while reading the hierarchy
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path the read failed on
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Source of raw per-pin records.
///
/// Implementations must read live state on every call; pin configuration
/// can change between boots or via dynamic overlay loading, so caching
/// across invocations is not allowed.
pub trait RecordSource {
    /// Fetch the raw record for one SoC pad name
    fn record(&mut self, soc_name: &str) -> Result<RawPinRecord, SourceError>;
}
