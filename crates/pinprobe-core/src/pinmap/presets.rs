//! Display wiring presets
//!
//! Common ST7789 display module wirings expressed as board pin numbers,
//! so users can find out which header pins their module expects before
//! inspecting them one by one.

/// One display module's control pin wiring (board pin numbers)
#[derive(Debug, Clone, Copy)]
pub struct DisplayPreset {
    /// Preset name used on the command line
    pub name: &'static str,
    /// Human-readable description of the module
    pub description: &'static str,
    /// Data/command select pin
    pub dc_pin: u8,
    /// Reset pin
    pub rst_pin: u8,
    /// Backlight pin; `None` means the module's BL pad is tied to 3.3V
    pub backlight_pin: Option<u8>,
    /// SPI controller index
    pub spi_port: u8,
    /// SPI chip select index
    pub spi_cs: u8,
}

/// Built-in display wiring presets, recommended wiring first
pub const DISPLAY_PRESETS: &[DisplayPreset] = &[
    DisplayPreset {
        name: "jetson",
        description: "Native Jetson Orin/Xavier wiring (pins 29/31, needs a pinmux overlay)",
        dc_pin: 29,
        rst_pin: 31,
        backlight_pin: None,
        spi_port: 0,
        spi_cs: 0,
    },
    DisplayPreset {
        name: "waveshare",
        description: "Waveshare 2inch LCD Module (ST7789V), Raspberry Pi compatible wiring",
        dc_pin: 22,
        rst_pin: 13,
        backlight_pin: Some(12),
        spi_port: 0,
        spi_cs: 0,
    },
    DisplayPreset {
        name: "adafruit",
        description: "Adafruit 2.0\" 320x240 IPS TFT (ST7789), Raspberry Pi compatible wiring",
        dc_pin: 22,
        rst_pin: 18,
        backlight_pin: None,
        spi_port: 0,
        spi_cs: 0,
    },
];
