//! Bounded blink sequence with guaranteed line release

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::info;
use pinprobe_core::classify::PinState;

use crate::driver::LineDriver;
use crate::error::{Error, Result};

/// Granularity of the interruptible hold between level changes
const HOLD_STEP: Duration = Duration::from_millis(25);

/// Blink sequence parameters
#[derive(Debug, Clone)]
pub struct BlinkOptions {
    /// Number of high/low cycles to run
    pub cycles: u32,
    /// Hold time at each level
    pub interval: Duration,
}

impl Default for BlinkOptions {
    fn default() -> Self {
        Self {
            cycles: 10,
            interval: Duration::from_secs(2),
        }
    }
}

/// Outcome of a blink run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlinkResult {
    /// Full high/low cycles that completed
    pub cycles_completed: u32,
    /// Whether the run was cut short by an interrupt
    pub aborted: bool,
    /// Hardware failure that ended the run, if any
    pub error: Option<String>,
}

/// Runs the blink sequence against a [`LineDriver`].
///
/// Construction enforces the safety precondition: the classifier must
/// have reported the pin GPIO-ready in the same invocation. Anything
/// else is refused before a single line toggle happens.
pub struct BlinkVerifier {
    stop: Arc<AtomicBool>,
}

impl BlinkVerifier {
    /// Build a verifier for a pin in the given state.
    ///
    /// Fails with [`Error::Precondition`] unless the state is
    /// [`PinState::GpioReady`].
    pub fn for_state(state: &PinState) -> Result<Self> {
        if !state.is_ready() {
            return Err(Error::Precondition {
                state: state.to_string(),
            });
        }
        Ok(Self {
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Flag that aborts the run when set (e.g. from a SIGINT handler).
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Run the sequence. `on_cycle` is called after each completed cycle
    /// with the running count.
    ///
    /// The line is driven low on every exit path: normal completion,
    /// interruption, hardware failure, and unwind.
    pub fn run<D, F>(&self, driver: &mut D, opts: &BlinkOptions, mut on_cycle: F) -> BlinkResult
    where
        D: LineDriver,
        F: FnMut(u32),
    {
        let mut guard = ReleaseGuard { driver };
        let mut cycles_completed = 0;
        let mut aborted = false;
        let mut error = None;

        info!(
            "blinking {} cycles at {:?} per level",
            opts.cycles, opts.interval
        );

        for _ in 0..opts.cycles {
            if self.stopped() {
                aborted = true;
                break;
            }
            if let Err(e) = guard.driver.set(true) {
                error = Some(e.to_string());
                break;
            }
            let interrupted = !self.hold(opts.interval);
            if let Err(e) = guard.driver.set(false) {
                error = Some(e.to_string());
                break;
            }
            if interrupted {
                aborted = true;
                break;
            }
            cycles_completed += 1;
            on_cycle(cycles_completed);
            if !self.hold(opts.interval) {
                aborted = true;
                break;
            }
        }

        BlinkResult {
            cycles_completed,
            aborted,
            error,
        }
    }

    fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Sleep for `interval` in small steps; `false` if interrupted.
    fn hold(&self, interval: Duration) -> bool {
        let mut remaining = interval;
        while remaining > Duration::ZERO {
            if self.stopped() {
                return false;
            }
            let step = remaining.min(HOLD_STEP);
            std::thread::sleep(step);
            remaining = remaining.saturating_sub(step);
        }
        !self.stopped()
    }
}

/// Drives the line low when the run scope exits, however it exits.
struct ReleaseGuard<'a, D: LineDriver> {
    driver: &'a mut D,
}

impl<D: LineDriver> Drop for ReleaseGuard<'_, D> {
    fn drop(&mut self) {
        let _ = self.driver.set(false);
    }
}
