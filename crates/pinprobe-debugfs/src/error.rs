//! Error types for debugfs reads

use pinprobe_core::record::SourceError;
use thiserror::Error;

/// Debugfs reader errors
#[derive(Debug, Error)]
pub enum Error {
    /// The pinctrl debug hierarchy is absent; debugfs is probably not
    /// mounted. Distinct from a pin lookup miss and checked before any
    /// per-pin work.
    #[error("pin-control debug interface not found at {path}; mount debugfs (mount -t debugfs none /sys/kernel/debug) and retry")]
    DebugFsUnavailable {
        /// Expected mount location
        path: String,
    },

    /// The calling process may not read the hierarchy
    #[error("permission denied reading {path}; rerun with elevated privileges")]
    PermissionDenied {
        /// Path the read failed on
        path: String,
    },

    /// The hierarchy exists but no controller lists this pad
    #[error("no pin controller exports pin '{soc_name}'")]
    PinNotExported {
        /// Pad name that was looked up
        soc_name: String,
    },

    /// Any other I/O failure
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path the read failed on
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl From<Error> for SourceError {
    fn from(e: Error) -> Self {
        match e {
            Error::DebugFsUnavailable { path } => SourceError::Unavailable { path },
            Error::PermissionDenied { path } => SourceError::PermissionDenied { path },
            Error::PinNotExported { soc_name } => SourceError::PinNotExported { soc_name },
            Error::Io { path, source } => SourceError::Io { path, source },
        }
    }
}

/// Result type for debugfs operations
pub type Result<T> = std::result::Result<T, Error>;
