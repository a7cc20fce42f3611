//! Error types for pinprobe-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Board pin number is outside the platform table domain
    #[error("board pin {board_pin} is not a muxable pin on platform '{platform}' (power/ground or absent)")]
    PinNotFound {
        /// The physical header pin number that was requested
        board_pin: u8,
        /// Platform id of the table that was consulted
        platform: String,
    },

    /// No platform table registered under the requested id
    #[error("unknown platform '{0}'; use the platforms command to list registered tables")]
    UnknownPlatform(String),

    /// Platform table failed its uniqueness validation
    #[error("platform table '{platform}' is invalid: {message}")]
    TableInvalid {
        /// Platform id of the offending table
        platform: String,
        /// What the validation found
        message: String,
    },

    /// Pin offers no GPIO-capable function, so no fragment can be generated
    #[error("pin has no GPIO-capable function among {available:?}")]
    NoGpioFunction {
        /// The function names the pin controller exports for this pin
        available: Vec<String>,
    },

    /// I/O error reading a platform table file
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// RON parse error in a platform table file
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path that failed to parse
        path: String,
        /// Underlying RON error
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Result type alias using the core error type
pub type Result<T> = std::result::Result<T, Error>;
