//! pinprobe - GPIO pinmux diagnostic for embedded SoC headers
//!
//! Answers one question about a physical header pin: is it routed to a
//! user-space-usable GPIO function, to some other peripheral, or left
//! unconfigured? The answer comes from the kernel's pin-control debugfs
//! hierarchy, decoded and classified by pinprobe-core. When a pin is
//! misrouted, a device-tree overlay *fragment* showing the fix is
//! printed; when it is ready, an optional hardware blink test confirms
//! the wiring visually.
//!
//! # Architecture
//!
//! - `pinprobe-core` - platform pin tables, record classification,
//!   overlay fragments, register decode
//! - `pinprobe-debugfs` - the pinctrl debugfs reader
//! - `pinprobe-gpio` - the blink verifier (GPIO character device)
//!
//! The binary itself only parses arguments, wires the crates together,
//! and maps outcomes to distinct exit codes.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use pinprobe_core::pinmap::PlatformRegistry;
use std::path::Path;
use std::time::Duration;

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            commands::exit_code::FAILURE
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let registry = load_registry(cli.platform_db.as_deref())?;

    match cli.command {
        Commands::Inspect {
            pin,
            blink,
            cycles,
            interval_ms,
            platform,
            gpiochip,
        } => commands::inspect::run(
            &registry,
            &commands::inspect::InspectArgs {
                pin,
                blink,
                cycles,
                interval: Duration::from_millis(interval_ms),
                platform,
                gpiochip,
            },
        ),
        Commands::ListPins { platform, presets } => {
            commands::list::list_pins(&registry, &platform, presets)?;
            Ok(commands::exit_code::OK)
        }
        Commands::Platforms => {
            commands::list::list_platforms(&registry);
            Ok(commands::exit_code::OK)
        }
        Commands::Decode { value } => {
            commands::decode::print_decode(value);
            Ok(commands::exit_code::OK)
        }
    }
}

/// Build the platform registry: built-in tables plus whatever the user
/// pointed --platform-db at
fn load_registry(path: Option<&Path>) -> Result<PlatformRegistry, Box<dyn std::error::Error>> {
    let mut registry = PlatformRegistry::with_builtin();

    if let Some(path) = path {
        if path.is_dir() {
            let count = registry.load_dir(path)?;
            log::debug!("loaded {} platform tables from {}", count, path.display());
        } else if path.is_file() {
            let id = registry.load_file(path)?;
            log::debug!("loaded platform table '{}' from {}", id, path.display());
        } else {
            return Err(format!("Platform table path not found: {}", path.display()).into());
        }
    }

    Ok(registry)
}
