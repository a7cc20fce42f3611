//! Pin inspection command
//!
//! Order of operations matters here: the platform table lookup and the
//! debugfs existence check both happen before any per-pin work, so a bad
//! pin number or an unmounted debugfs aborts with its own exit code and
//! no half-printed report.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use pinprobe_core::classify::Classifier;
use pinprobe_core::diagnose::{diagnose, DiagnoseError, Diagnosis};
use pinprobe_core::overlay;
use pinprobe_core::pinmap::PlatformRegistry;
use pinprobe_debugfs::{DebugfsReader, PinNumbers};
use pinprobe_gpio::{BlinkOptions, BlinkVerifier, CdevLine};

use super::exit_code;

/// Arguments for one inspection run
pub struct InspectArgs {
    /// Board pin number to inspect
    pub pin: u8,
    /// Run the blink test after a GPIO-ready classification
    pub blink: bool,
    /// Blink cycle count
    pub cycles: u32,
    /// Hold time per level
    pub interval: Duration,
    /// Platform table id
    pub platform: String,
    /// GPIO chip device path
    pub gpiochip: String,
}

/// Inspect one pin and return the process exit code
pub fn run(
    registry: &PlatformRegistry,
    args: &InspectArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let table = match registry.get(&args.platform) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(exit_code::CONFIG);
        }
    };

    // Single fail-fast environment check, before any pin lookup.
    let mut reader = match DebugfsReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(exit_code::ENVIRONMENT);
        }
    };

    let classifier = Classifier::tegra234();
    let diagnosis = match diagnose(table, args.pin, &mut reader, &classifier) {
        Ok(diagnosis) => diagnosis,
        Err(DiagnoseError::Config(e)) => {
            eprintln!("Error: {}", e);
            return Ok(exit_code::CONFIG);
        }
        Err(DiagnoseError::Environment(e)) => {
            eprintln!("Error: {}", e);
            return Ok(exit_code::ENVIRONMENT);
        }
    };

    let available = reader
        .available_functions(diagnosis.descriptor.soc_name())
        .unwrap_or_else(|e| {
            log::warn!("could not list available functions: {}", e);
            Vec::new()
        });
    let numbers = reader
        .pin_numbers(diagnosis.descriptor.soc_name())
        .unwrap_or_else(|e| {
            log::warn!("could not read pin numbers: {}", e);
            None
        });

    print_report(&diagnosis, &available, numbers.as_ref());

    if diagnosis.state.is_ready() {
        if args.blink {
            blink(&diagnosis, numbers.as_ref(), args)
        } else {
            println!();
            println!("READY: pin is configured as GPIO and usable from user space.");
            println!("TIP: add --blink to drive it through a visual test.");
            Ok(exit_code::OK)
        }
    } else {
        print_fragment(&diagnosis, &available);
        if args.blink {
            eprintln!();
            eprintln!("Cannot blink: {}.", diagnosis.state);
            eprintln!("Install an overlay containing the fragment above, reboot, and retry.");
        }
        Ok(exit_code::NOT_READY)
    }
}

/// Print the classification report
fn print_report(diagnosis: &Diagnosis, available: &[String], numbers: Option<&PinNumbers>) {
    let descriptor = &diagnosis.descriptor;

    println!("Pin {} Analysis", descriptor.board_pin());
    println!("===============");
    println!();
    println!("Board pin:        {}", descriptor.board_pin());
    println!("SoC pad:          {}", descriptor.soc_name());

    if descriptor.candidate_functions().is_empty() {
        println!("Candidates:       (none; reserved pad)");
    } else {
        println!(
            "Candidates:       {}",
            descriptor.candidate_functions().join(", ")
        );
    }

    if let Some(numbers) = numbers {
        println!(
            "Controller:       {} (pin {})",
            numbers.controller, numbers.controller_pin
        );
        if let Some(line) = numbers.gpio_line {
            println!("GPIO line:        {}", line);
        }
    }

    if let Some(register) = descriptor.pinmux_register() {
        println!("Pad register:     0x{:08X} (from TRM)", register);
        println!(
            "                  read it with: sudo busybox devmem 0x{:08X}, then pinprobe decode <value>",
            register
        );
    }

    println!();
    println!("State:            {}", diagnosis.state);

    // Always show the raw record; for unreadable records it is the only
    // way the user (or a decoder maintainer) can see what the kernel said.
    if let Some(record) = &diagnosis.record {
        println!("Record:           {}", record.raw_text.trim());
        println!("Source:           {}", record.source_path.display());
    }

    if !available.is_empty() {
        println!();
        println!("Available functions:");
        for function in available {
            let marker = if pinprobe_core::classify::GPIO_FUNCTION_MARKERS
                .iter()
                .any(|m| m.eq_ignore_ascii_case(function))
            {
                " (GPIO)"
            } else {
                ""
            };
            println!("  - {}{}", function, marker);
        }
    }
}

/// Print the overlay fragment for a non-ready pin
fn print_fragment(diagnosis: &Diagnosis, available: &[String]) {
    println!();
    println!("--- Device-tree fragment (reference only, not loadable as-is) ---");
    match overlay::generate(&diagnosis.descriptor, available) {
        Ok(fragment) => {
            println!("{}", fragment.dts_text());
            println!("NOTES:");
            println!("  - Add this node to the pinmux section of a full overlay.");
            println!("  - For output-only use, change nvidia,enable-input to <0x0>.");
            println!("  - For pull-up change nvidia,pull to <0x2>, pull-down to <0x1>.");
        }
        Err(e) => {
            eprintln!("Cannot generate a fragment: {}", e);
        }
    }
}

/// Run the hardware blink test and map the outcome to an exit code
fn blink(
    diagnosis: &Diagnosis,
    numbers: Option<&PinNumbers>,
    args: &InspectArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let Some(line) = numbers.and_then(|n| n.gpio_line) else {
        eprintln!(
            "Error: no GPIO line mapping for pin {}; cannot blink",
            args.pin
        );
        return Ok(exit_code::HARDWARE);
    };

    let verifier = match BlinkVerifier::for_state(&diagnosis.state) {
        Ok(verifier) => verifier,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(exit_code::HARDWARE);
        }
    };
    install_sigint(verifier.stop_flag());

    // DeviceBusy and PermissionDenied carry their own remediation text.
    let mut driver = match CdevLine::open(&args.gpiochip, line) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(exit_code::HARDWARE);
        }
    };

    println!();
    println!(
        "Blinking pin {} (GPIO line {} on {}), {} cycles at {} ms per level; Ctrl-C stops.",
        args.pin,
        line,
        args.gpiochip,
        args.cycles,
        args.interval.as_millis()
    );

    let bar = ProgressBar::new(args.cycles as u64);
    bar.set_style(
        ProgressStyle::with_template("  {bar:30} cycle {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let options = BlinkOptions {
        cycles: args.cycles,
        interval: args.interval,
    };
    let result = verifier.run(&mut driver, &options, |n| bar.set_position(n as u64));
    bar.finish_and_clear();

    if let Some(error) = result.error {
        eprintln!("Error during blink: {}", error);
        eprintln!(
            "Completed {} of {} cycles; line released.",
            result.cycles_completed, args.cycles
        );
        return Ok(exit_code::HARDWARE);
    }
    if result.aborted {
        println!(
            "Interrupted after {} of {} cycles; line released.",
            result.cycles_completed, args.cycles
        );
    } else {
        println!("Blink test complete ({} cycles).", result.cycles_completed);
    }
    Ok(exit_code::OK)
}

/// Stop flag the SIGINT handler flips; handlers can only touch statics
static BLINK_STOP: OnceLock<Arc<AtomicBool>> = OnceLock::new();

extern "C" fn handle_sigint(_: libc::c_int) {
    if let Some(flag) = BLINK_STOP.get() {
        flag.store(true, Ordering::Relaxed);
    }
}

fn install_sigint(flag: Arc<AtomicBool>) {
    let _ = BLINK_STOP.set(flag);
    // SAFETY: the handler only stores to an atomic, which is
    // async-signal-safe.
    unsafe {
        libc::signal(libc::SIGINT, handle_sigint as usize);
    }
}
