//! pinprobe-debugfs - kernel pinctrl debugfs reader
//!
//! Reads the per-pin state the kernel's pin-control subsystem exposes
//! under `/sys/kernel/debug/pinctrl`. Each pin controller gets a
//! directory there with (among others) three text files this crate cares
//! about:
//!
//! - `pinmux-pins` - current mux/GPIO ownership and function per pin
//! - `pinmux-functions` - selectable functions and their pin groups
//! - `pins` - controller pin indices and GPIO line mapping
//!
//! The textual layout of these files is not a stable kernel contract;
//! this crate only locates the right lines and hands them up as
//! [`pinprobe_core::record::RawPinRecord`]s, leaving interpretation to
//! the versioned decoders in pinprobe-core.
//!
//! Reads are always live. Pin configuration can change between boots or
//! via dynamic overlay loading, so nothing is cached across calls.

pub mod error;
pub mod reader;

pub use error::{Error, Result};
pub use reader::{DebugfsReader, PinNumbers, PINCTRL_DEBUGFS_ROOT};
