//! Debugfs reader implementation

use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use pinprobe_core::record::{RawPinRecord, RecordSource, SourceError};

use crate::error::{Error, Result};

/// Default location of the pin-control debug hierarchy
pub const PINCTRL_DEBUGFS_ROOT: &str = "/sys/kernel/debug/pinctrl";

/// Controller pin indices for one pad, from the `pins` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinNumbers {
    /// Pin controller directory name (e.g. `2430000.pinmux`)
    pub controller: String,
    /// Controller-local pin index
    pub controller_pin: u32,
    /// Global GPIO line number, when the pad maps to a GPIO chip line
    pub gpio_line: Option<u32>,
}

/// Reader over the pinctrl debug hierarchy.
///
/// Construction performs the single fail-fast existence check; every
/// read afterwards hits the live files again.
#[derive(Debug)]
pub struct DebugfsReader {
    root: PathBuf,
}

impl DebugfsReader {
    /// Open the default hierarchy under [`PINCTRL_DEBUGFS_ROOT`]
    pub fn new() -> Result<Self> {
        Self::with_root(Path::new(PINCTRL_DEBUGFS_ROOT))
    }

    /// Open a hierarchy at a caller-chosen root (tests, chroots)
    pub fn with_root(root: &Path) -> Result<Self> {
        match std::fs::metadata(root) {
            Ok(meta) if meta.is_dir() => Ok(Self {
                root: root.to_path_buf(),
            }),
            Ok(_) => Err(Error::DebugFsUnavailable {
                path: root.display().to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Err(Error::PermissionDenied {
                path: root.display().to_string(),
            }),
            Err(_) => Err(Error::DebugFsUnavailable {
                path: root.display().to_string(),
            }),
        }
    }

    /// Fetch the raw `pinmux-pins` record for one pad
    pub fn read(&self, soc_name: &str) -> Result<RawPinRecord> {
        for controller in self.controllers()? {
            let path = controller.join("pinmux-pins");
            let Some(content) = self.read_optional(&path)? else {
                continue;
            };
            if let Some(line) = find_pin_line(&content, soc_name) {
                debug!("found '{}' in {}", soc_name, path.display());
                return Ok(RawPinRecord {
                    soc_name: soc_name.to_string(),
                    raw_text: line.to_string(),
                    source_path: path,
                });
            }
        }
        Err(Error::PinNotExported {
            soc_name: soc_name.to_string(),
        })
    }

    /// Functions the controller can route this pad to, from
    /// `pinmux-functions`. Empty when no controller lists the pad.
    pub fn available_functions(&self, soc_name: &str) -> Result<Vec<String>> {
        let mut functions = Vec::new();
        for controller in self.controllers()? {
            let path = controller.join("pinmux-functions");
            let Some(content) = self.read_optional(&path)? else {
                continue;
            };
            for line in content.lines() {
                if let Some(function) = parse_function_line(line, soc_name) {
                    if !functions.contains(&function) {
                        functions.push(function);
                    }
                }
            }
            if !functions.is_empty() {
                break;
            }
        }
        functions.sort();
        Ok(functions)
    }

    /// Controller pin index and GPIO line mapping from the `pins` file
    pub fn pin_numbers(&self, soc_name: &str) -> Result<Option<PinNumbers>> {
        for controller in self.controllers()? {
            let path = controller.join("pins");
            let Some(content) = self.read_optional(&path)? else {
                continue;
            };
            if let Some(line) = find_pin_line(&content, soc_name) {
                let controller_name = controller
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                return Ok(parse_pins_line(line, controller_name));
            }
        }
        Ok(None)
    }

    /// List controller directories in name order (deterministic scans)
    fn controllers(&self) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| self.classify_io(&self.root, e))?;
        let mut controllers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.classify_io(&self.root, e))?;
            let path = entry.path();
            if path.is_dir() {
                controllers.push(path);
            }
        }
        controllers.sort();
        Ok(controllers)
    }

    /// Read a controller file; `None` when the controller does not have it
    fn read_optional(&self, path: &Path) -> Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.classify_io(path, e)),
        }
    }

    fn classify_io(&self, path: &Path, e: io::Error) -> Error {
        if e.kind() == io::ErrorKind::PermissionDenied {
            Error::PermissionDenied {
                path: path.display().to_string(),
            }
        } else {
            Error::Io {
                path: path.display().to_string(),
                source: e,
            }
        }
    }
}

impl RecordSource for DebugfsReader {
    fn record(&mut self, soc_name: &str) -> std::result::Result<RawPinRecord, SourceError> {
        self.read(soc_name).map_err(SourceError::from)
    }
}

/// Find the line mentioning a pad by its parenthesized name, as both
/// `pinmux-pins` and `pins` print it: `pin 105 (SOC_GPIO32_PQ5) ...`.
/// Parenthesized matching keeps `soc_gpio3` from hitting `soc_gpio32`.
fn find_pin_line<'a>(content: &'a str, soc_name: &str) -> Option<&'a str> {
    let needle = format!("({})", soc_name.to_uppercase());
    content
        .lines()
        .find(|line| line.to_uppercase().contains(&needle))
}

/// Parse one `pinmux-functions` line if its group list contains the pad.
///
/// Format: `function 7: rsvd0, groups = [ soc_gpio32_pq5, soc_gpio33_pq6 ]`
fn parse_function_line(line: &str, soc_name: &str) -> Option<String> {
    let line = line.trim();
    let rest = line.strip_prefix("function ")?;
    let (_, rest) = rest.split_once(": ")?;
    let (function, rest) = rest.split_once(',')?;

    let groups = rest.split_once('[')?.1.split_once(']')?.0;
    let in_groups = groups
        .split(|c: char| c == ',' || c.is_whitespace())
        .any(|token| token.eq_ignore_ascii_case(soc_name));

    in_groups.then(|| function.trim().to_string())
}

/// Parse one `pins` line.
///
/// Format: `pin 105 (SOC_GPIO32_PQ5) 105:tegra234-gpio  2430000.pinmux`;
/// the token with a numeric prefix before a colon is the global GPIO line.
fn parse_pins_line(line: &str, controller: String) -> Option<PinNumbers> {
    let rest = line.trim().strip_prefix("pin ")?;
    let (number, rest) = rest.split_once(' ')?;
    let controller_pin = number.parse().ok()?;

    let gpio_line = rest.split_whitespace().find_map(|token| {
        let (prefix, _) = token.split_once(':')?;
        prefix.parse::<u32>().ok()
    });

    Some(PinNumbers {
        controller,
        controller_pin,
        gpio_line,
    })
}
