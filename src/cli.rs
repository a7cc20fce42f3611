//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse a string as a hex or decimal u32
fn parse_hex_u32(s: &str) -> Result<u32, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

#[derive(Parser)]
#[command(name = "pinprobe")]
#[command(author, version, about = "GPIO pinmux diagnostic for embedded SoC headers", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Extra platform table: a RON file or a directory of .ron files
    #[arg(long, global = true)]
    pub platform_db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect one header pin's pinmux routing and GPIO availability
    Inspect {
        /// Physical board pin number on the 40-pin header
        pin: u8,

        /// Blink the pin after a GPIO-ready classification
        #[arg(short, long)]
        blink: bool,

        /// Number of blink cycles
        #[arg(long, default_value_t = 10)]
        cycles: u32,

        /// Hold time per level in milliseconds
        #[arg(long, default_value_t = 2000)]
        interval_ms: u64,

        /// Platform table to resolve the pin against
        #[arg(long, default_value = pinprobe_core::pinmap::JETSON_ORIN)]
        platform: String,

        /// GPIO chip device used for blinking
        #[arg(long, default_value = pinprobe_gpio::DEFAULT_GPIOCHIP)]
        gpiochip: String,
    },

    /// List the muxable header pins of a platform table
    ListPins {
        /// Platform table to list
        #[arg(long, default_value = pinprobe_core::pinmap::JETSON_ORIN)]
        platform: String,

        /// Also show common display wiring presets
        #[arg(long)]
        presets: bool,
    },

    /// List registered platform tables
    Platforms,

    /// Decode a raw pad control register value
    Decode {
        /// Register value (hex 0x... or decimal), e.g. from devmem
        #[arg(value_parser = parse_hex_u32)]
        value: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_u32() {
        assert_eq!(parse_hex_u32("0x54").unwrap(), 0x54);
        assert_eq!(parse_hex_u32("0X54").unwrap(), 0x54);
        assert_eq!(parse_hex_u32("84").unwrap(), 84);
        assert!(parse_hex_u32("0xzz").is_err());
    }

    #[test]
    fn test_cli_parses_inspect() {
        let cli = Cli::try_parse_from(["pinprobe", "inspect", "29", "--blink"]).unwrap();
        match cli.command {
            Commands::Inspect { pin, blink, .. } => {
                assert_eq!(pin, 29);
                assert!(blink);
            }
            _ => panic!("expected inspect"),
        }
    }
}
