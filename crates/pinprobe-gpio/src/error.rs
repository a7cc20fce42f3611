//! Error types for GPIO line operations

use thiserror::Error;

/// GPIO verifier errors
#[derive(Debug, Error)]
pub enum Error {
    /// The classifier did not report the pin GPIO-ready; driving it is
    /// refused outright.
    #[error("pin is not GPIO-ready ({state}); refusing to drive it")]
    Precondition {
        /// The classification the refusal is based on
        state: String,
    },

    /// Another process or driver holds the line
    #[error("GPIO line {offset} on {chip} is busy; another process or driver holds it")]
    DeviceBusy {
        /// GPIO chip device path
        chip: String,
        /// Line offset on the chip
        offset: u32,
    },

    /// The calling process may not open the GPIO chip
    #[error("permission denied opening {chip}; rerun with elevated privileges")]
    PermissionDenied {
        /// GPIO chip device path
        chip: String,
    },

    /// Failed to request the GPIO line
    #[error("failed to request GPIO line: {0}")]
    LineRequestFailed(#[source] gpiocdev::Error),

    /// Failed to set the GPIO line value
    #[error("failed to set GPIO line value: {0}")]
    SetValueFailed(#[source] gpiocdev::Error),
}

/// Result type for GPIO operations
pub type Result<T> = std::result::Result<T, Error>;
