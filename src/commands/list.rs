//! List commands implementation

use pinprobe_core::pinmap::{PlatformRegistry, DISPLAY_PRESETS};

/// List the muxable pins of one platform table
pub fn list_pins(
    registry: &PlatformRegistry,
    platform: &str,
    presets: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = registry.get(platform)?;

    println!("{}", table.description());
    println!();
    println!(
        "{:<5} {:<20} {:<16} {:>12}",
        "Pin", "SoC pad", "Candidates", "Pad register"
    );
    println!("{}", "-".repeat(56));

    for pin in table.iter() {
        let functions = if pin.candidate_functions().is_empty() {
            "-".to_string()
        } else {
            pin.candidate_functions().join(", ")
        };
        let register = pin
            .pinmux_register()
            .map(|r| format!("0x{:08X}", r))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<5} {:<20} {:<16} {:>12}",
            pin.board_pin(),
            pin.soc_name(),
            functions,
            register
        );
    }

    if presets {
        print_presets();
    }

    Ok(())
}

/// List the registered platform tables
pub fn list_platforms(registry: &PlatformRegistry) {
    println!("Registered platform tables:");
    println!();
    for table in registry.iter() {
        println!("  {:<20} {} pins - {}", table.platform(), table.len(), table.description());
    }
}

fn print_presets() {
    println!();
    println!("Display wiring presets (board pin numbers):");
    for preset in DISPLAY_PRESETS {
        println!();
        println!("  {}: {}", preset.name, preset.description);
        println!("    DC pin:     {}", preset.dc_pin);
        println!("    RST pin:    {}", preset.rst_pin);
        match preset.backlight_pin {
            Some(pin) => println!("    Backlight:  {}", pin),
            None => println!("    Backlight:  tie to 3.3V"),
        }
        println!(
            "    SPI:        port {}, CS {} (MOSI 19, SCLK 23, CE0 24)",
            preset.spi_port, preset.spi_cs
        );
    }
}
