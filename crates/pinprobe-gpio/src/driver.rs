//! GPIO line drivers
//!
//! The [`LineDriver`] trait is the seam between the blink verifier and
//! the hardware, so tests can substitute a recording double. The real
//! implementation, [`CdevLine`], holds one output line requested through
//! the GPIO character device; the kernel releases the request when the
//! value is dropped.

use std::io;
use std::path::Path;

use gpiocdev::line::{Offset, Value};
use gpiocdev::request::{Config, Request};
use log::debug;

use crate::error::{Error, Result};

/// A single GPIO output line
pub trait LineDriver {
    /// Drive the line high or low
    fn set(&mut self, high: bool) -> Result<()>;
}

/// Output line requested via the GPIO character device
pub struct CdevLine {
    request: Request,
    offset: Offset,
}

impl CdevLine {
    /// Request `offset` on `chip` as an output, initially low.
    ///
    /// A line already held by another consumer reports
    /// [`Error::DeviceBusy`]; an unreadable chip device reports
    /// [`Error::PermissionDenied`]. The two need different remediation,
    /// so they are never conflated.
    pub fn open(chip: &str, offset: Offset) -> Result<Self> {
        let mut config = Config::default();
        config.with_line(offset).as_output(Value::Inactive);

        match Request::from_config(config)
            .on_chip(chip)
            .with_consumer("pinprobe")
            .request()
        {
            Ok(request) => {
                debug!("requested {} line {} as output", chip, offset);
                Ok(Self { request, offset })
            }
            Err(e) => Err(classify_request_error(chip, offset, e)),
        }
    }
}

impl LineDriver for CdevLine {
    fn set(&mut self, high: bool) -> Result<()> {
        let value = if high { Value::Active } else { Value::Inactive };
        self.request
            .set_value(self.offset, value)
            .map(|_| ())
            .map_err(Error::SetValueFailed)
    }
}

impl Drop for CdevLine {
    fn drop(&mut self) {
        // Leave the pad low before the kernel reclaims the request.
        if let Err(e) = self.request.set_value(self.offset, Value::Inactive) {
            log::warn!("failed to drive line {} low on release: {}", self.offset, e);
        }
    }
}

/// Sort a failed line request into the error taxonomy
fn classify_request_error(chip: &str, offset: Offset, e: gpiocdev::Error) -> Error {
    if let Err(io_err) = std::fs::metadata(Path::new(chip)) {
        if io_err.kind() == io::ErrorKind::PermissionDenied {
            return Error::PermissionDenied {
                chip: chip.to_string(),
            };
        }
    }

    if line_in_use(chip, offset) {
        return Error::DeviceBusy {
            chip: chip.to_string(),
            offset,
        };
    }

    Error::LineRequestFailed(e)
}

/// Whether the chip reports the line as already used by a consumer
fn line_in_use(chip: &str, offset: Offset) -> bool {
    gpiocdev::chip::Chip::from_path(chip)
        .and_then(|chip| chip.line_info(offset))
        .map(|info| info.used)
        .unwrap_or(false)
}
