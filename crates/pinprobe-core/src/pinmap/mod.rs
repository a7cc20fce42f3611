//! Platform pin map tables
//!
//! A [`PlatformTable`] maps physical header pin numbers to SoC pad names
//! and the candidate peripheral functions each pad can be muxed to. Tables
//! are immutable once built; [`PlatformTableBuilder::build`] validates the
//! uniqueness invariants (one board pin per pad, one pad per board pin)
//! before handing the table out, so lookups never have to deal with
//! ambiguity.
//!
//! Several platform tables can coexist in a [`PlatformRegistry`], keyed by
//! a platform id string. The built-in table covers the Jetson Orin
//! Nano/NX 40-pin header (Tegra234); additional tables can be loaded from
//! RON files at runtime.

mod orin;
mod presets;
mod ron_file;

pub use orin::JETSON_ORIN;
pub use presets::{DisplayPreset, DISPLAY_PRESETS};

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

/// One header pin's static description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinDescriptor {
    board_pin: u8,
    soc_name: String,
    candidate_functions: Vec<String>,
    pinmux_register: Option<u32>,
}

impl PinDescriptor {
    /// Physical position on the 40-pin header
    pub fn board_pin(&self) -> u8 {
        self.board_pin
    }

    /// SoC pad name as the pin controller exports it (lowercase)
    pub fn soc_name(&self) -> &str {
        &self.soc_name
    }

    /// Peripheral function names this pad can be muxed to, in table order.
    ///
    /// Empty for pads shared with reserved functions; resolution still
    /// succeeds for those, classification reports whatever the kernel says.
    pub fn candidate_functions(&self) -> &[String] {
        &self.candidate_functions
    }

    /// Pad control register address from the SoC TRM, when known.
    ///
    /// The running kernel does not export pad-to-register mappings, so
    /// these come from the vendor reference manual.
    pub fn pinmux_register(&self) -> Option<u32> {
        self.pinmux_register
    }
}

/// Immutable, validated pin lookup table for one platform
#[derive(Debug, Clone)]
pub struct PlatformTable {
    platform: String,
    description: String,
    pins: Vec<PinDescriptor>,
    by_board_pin: BTreeMap<u8, usize>,
    by_soc_name: BTreeMap<String, usize>,
}

impl PlatformTable {
    /// Platform id this table is registered under
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// One-line description of the platform generation
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Resolve a physical header pin number to its descriptor
    pub fn resolve(&self, board_pin: u8) -> Result<&PinDescriptor> {
        self.by_board_pin
            .get(&board_pin)
            .map(|&i| &self.pins[i])
            .ok_or_else(|| Error::PinNotFound {
                board_pin,
                platform: self.platform.clone(),
            })
    }

    /// Reverse lookup by SoC pad name (case-insensitive)
    pub fn resolve_name(&self, soc_name: &str) -> Option<&PinDescriptor> {
        self.by_soc_name
            .get(&soc_name.to_lowercase())
            .map(|&i| &self.pins[i])
    }

    /// Iterate over all descriptors in board pin order
    pub fn iter(&self) -> impl Iterator<Item = &PinDescriptor> {
        self.by_board_pin.values().map(move |&i| &self.pins[i])
    }

    /// Number of muxable pins in the table
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Whether the table holds no pins
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Load a platform table from a RON file
    pub fn from_ron_file(path: &Path) -> Result<Self> {
        ron_file::from_file(path)
    }

    /// Load a platform table from a RON string
    pub fn from_ron_str(content: &str) -> Result<Self> {
        ron_file::from_str(content, "<inline>")
    }
}

/// Arena-style builder for [`PlatformTable`]
///
/// Entries are collected first; `build()` validates the whole set up front
/// and rejects duplicate board pins or pad names.
#[derive(Debug)]
pub struct PlatformTableBuilder {
    platform: String,
    description: String,
    pins: Vec<PinDescriptor>,
}

impl PlatformTableBuilder {
    /// Start a builder for the given platform id
    pub fn new(platform: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            description: description.into(),
            pins: Vec::new(),
        }
    }

    /// Add a pin without a known pad register address
    pub fn pin(self, board_pin: u8, soc_name: &str, functions: &[&str]) -> Self {
        self.entry(board_pin, soc_name, functions, None)
    }

    /// Add a pin with its TRM pad control register address
    pub fn pin_at(self, board_pin: u8, soc_name: &str, functions: &[&str], register: u32) -> Self {
        self.entry(board_pin, soc_name, functions, Some(register))
    }

    fn entry(
        mut self,
        board_pin: u8,
        soc_name: &str,
        functions: &[&str],
        pinmux_register: Option<u32>,
    ) -> Self {
        self.pins.push(PinDescriptor {
            board_pin,
            soc_name: soc_name.to_lowercase(),
            candidate_functions: functions.iter().map(|f| f.to_lowercase()).collect(),
            pinmux_register,
        });
        self
    }

    /// Add an already-constructed descriptor (used by the RON loader)
    pub(crate) fn push(mut self, descriptor: PinDescriptor) -> Self {
        self.pins.push(descriptor);
        self
    }

    /// Validate the collected entries and freeze them into a table
    pub fn build(self) -> Result<PlatformTable> {
        let mut by_board_pin = BTreeMap::new();
        let mut by_soc_name = BTreeMap::new();

        for (i, pin) in self.pins.iter().enumerate() {
            if by_board_pin.insert(pin.board_pin, i).is_some() {
                return Err(Error::TableInvalid {
                    platform: self.platform,
                    message: format!("duplicate board pin {}", pin.board_pin),
                });
            }
            if by_soc_name.insert(pin.soc_name.clone(), i).is_some() {
                return Err(Error::TableInvalid {
                    platform: self.platform,
                    message: format!("duplicate pad name '{}'", pin.soc_name),
                });
            }
        }

        Ok(PlatformTable {
            platform: self.platform,
            description: self.description,
            pins: self.pins,
            by_board_pin,
            by_soc_name,
        })
    }
}

/// Collection of platform tables keyed by platform id
#[derive(Debug, Default)]
pub struct PlatformRegistry {
    tables: BTreeMap<String, PlatformTable>,
}

impl PlatformRegistry {
    /// Registry holding only the built-in platform tables
    pub fn with_builtin() -> Self {
        let mut registry = Self::default();
        registry
            .tables
            .insert(JETSON_ORIN.to_string(), orin::table());
        registry
    }

    /// Platform id used when the caller does not select one
    pub fn default_platform() -> &'static str {
        JETSON_ORIN
    }

    /// Fetch a table by platform id
    pub fn get(&self, platform: &str) -> Result<&PlatformTable> {
        self.tables
            .get(platform)
            .ok_or_else(|| Error::UnknownPlatform(platform.to_string()))
    }

    /// Register a table; rejects an id that is already taken
    pub fn insert(&mut self, table: PlatformTable) -> Result<()> {
        let id = table.platform().to_string();
        if self.tables.contains_key(&id) {
            return Err(Error::TableInvalid {
                platform: id.clone(),
                message: "platform id already registered".to_string(),
            });
        }
        self.tables.insert(id, table);
        Ok(())
    }

    /// Load one platform table from a RON file and register it
    pub fn load_file(&mut self, path: &Path) -> Result<String> {
        let table = PlatformTable::from_ron_file(path)?;
        let id = table.platform().to_string();
        self.insert(table)?;
        log::debug!("registered platform '{}' from {}", id, path.display());
        Ok(id)
    }

    /// Load every `.ron` file from a directory; returns how many registered
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut count = 0;
        let entries = std::fs::read_dir(dir).map_err(|e| Error::Io {
            path: dir.display().to_string(),
            source: e,
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::Io {
                path: dir.display().to_string(),
                source: e,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                self.load_file(&path)?;
                count += 1;
            }
        }
        Ok(count)
    }

    /// Iterate over registered tables in id order
    pub fn iter(&self) -> impl Iterator<Item = &PlatformTable> {
        self.tables.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_round_trip() {
        let table = orin::table();
        for pin in table.iter() {
            let resolved = table.resolve(pin.board_pin()).unwrap();
            assert_eq!(resolved.board_pin(), pin.board_pin());
            assert_eq!(resolved.soc_name(), pin.soc_name());
        }
    }

    #[test]
    fn test_resolve_unknown_pin() {
        let table = orin::table();
        // Pin 6 is ground, pin 41 is off the header entirely
        for bad in [0u8, 1, 6, 41, 255] {
            match table.resolve(bad) {
                Err(Error::PinNotFound { board_pin, .. }) => assert_eq!(board_pin, bad),
                other => panic!("expected PinNotFound for pin {}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_resolve_name_case_insensitive() {
        let table = orin::table();
        let pin = table.resolve_name("SOC_GPIO32_PQ5").unwrap();
        assert_eq!(pin.board_pin(), 29);
        assert_eq!(pin.soc_name(), "soc_gpio32_pq5");
    }

    #[test]
    fn test_builder_rejects_duplicate_board_pin() {
        let result = PlatformTableBuilder::new("test", "test")
            .pin(29, "soc_gpio32_pq5", &[])
            .pin(29, "soc_gpio33_pq6", &[])
            .build();
        assert!(matches!(result, Err(Error::TableInvalid { .. })));
    }

    #[test]
    fn test_builder_rejects_duplicate_pad_name() {
        let result = PlatformTableBuilder::new("test", "test")
            .pin(29, "soc_gpio32_pq5", &[])
            .pin(31, "SOC_GPIO32_PQ5", &[])
            .build();
        assert!(matches!(result, Err(Error::TableInvalid { .. })));
    }

    #[test]
    fn test_registry_rejects_duplicate_platform() {
        let mut registry = PlatformRegistry::with_builtin();
        let clash = PlatformTableBuilder::new(JETSON_ORIN, "clash")
            .build()
            .unwrap();
        assert!(matches!(
            registry.insert(clash),
            Err(Error::TableInvalid { .. })
        ));
    }

    #[test]
    fn test_registry_unknown_platform() {
        let registry = PlatformRegistry::with_builtin();
        assert!(matches!(
            registry.get("no-such-board"),
            Err(Error::UnknownPlatform(_))
        ));
    }
}
