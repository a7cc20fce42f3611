//! pinprobe-gpio - hardware blink verification
//!
//! Drives a GPIO line through a bounded on/off sequence so a human can
//! visually confirm wiring. Uses the Linux GPIO character device
//! interface via the gpiocdev crate; the deprecated sysfs interface is
//! not supported.
//!
//! The verifier refuses to run unless the classifier reported the pin
//! GPIO-ready in the same invocation: driving a pad whose function is
//! unknown or claimed elsewhere can cause undefined voltage levels or
//! hardware conflicts. The line is driven low and relinquished on every
//! exit path, including interruption.
//!
//! # System requirements
//!
//! - Linux kernel 4.8+ with GPIO character device support
//! - Access to `/dev/gpiochipN` (may require root or udev rules)

pub mod driver;
pub mod error;
pub mod verifier;

pub use driver::{CdevLine, LineDriver};
pub use error::{Error, Result};
pub use verifier::{BlinkOptions, BlinkResult, BlinkVerifier};

/// Default GPIO chip device for Tegra234 header pins
pub const DEFAULT_GPIOCHIP: &str = "/dev/gpiochip0";
