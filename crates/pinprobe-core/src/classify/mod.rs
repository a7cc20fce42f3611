//! Pin state classification
//!
//! Turns one [`RawPinRecord`] plus the pin's candidate functions into a
//! [`PinState`]. Decoding of the vendor text encoding lives behind the
//! [`RecordDecoder`] trait ([`decode`]); the decision logic is an ordered
//! rule list ([`rules`]). Classification is a pure function of its inputs.

pub mod decode;
mod rules;

pub use decode::{DecodeError, DecodedRecord, RecordDecoder, Tegra234Decoder};

use std::fmt;

use crate::record::RawPinRecord;

/// Function names that select the pad's general-purpose I/O path on
/// Tegra234 (`gp` plus the reserved selectors).
pub const GPIO_FUNCTION_MARKERS: &[&str] = &["gp", "rsvd0", "rsvd1", "rsvd2", "rsvd3"];

/// Normalized operational state of one pin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinState {
    /// Routed to GPIO and claimable from user space
    GpioReady,
    /// Routed to GPIO but held by a kernel driver, so unusable as-is
    GpioConfiguredUnused,
    /// Routed to a peripheral function; carries the function name
    AltFunction(String),
    /// The pin controller exports no state for this pad
    NotFound,
    /// The record did not match any known encoding; carries the reason
    /// and the raw text
    Unreadable(String),
}

impl PinState {
    /// Whether this state means the pin can be driven right now
    pub fn is_ready(&self) -> bool {
        matches!(self, PinState::GpioReady)
    }
}

impl fmt::Display for PinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioReady => write!(f, "GPIO, ready to use"),
            Self::GpioConfiguredUnused => {
                write!(f, "GPIO-routed but claimed by another driver")
            }
            Self::AltFunction(name) => write!(f, "routed to peripheral function '{}'", name),
            Self::NotFound => write!(f, "not exported by the pin controller"),
            Self::Unreadable(reason) => write!(f, "unreadable pin record: {}", reason),
        }
    }
}

/// Record classifier with a pluggable decoder
pub struct Classifier {
    decoder: Box<dyn RecordDecoder>,
}

impl Classifier {
    /// Classifier for the Tegra234 encoding (the built-in platform)
    pub fn tegra234() -> Self {
        Self::with_decoder(Box::new(Tegra234Decoder))
    }

    /// Classifier with a caller-supplied decoder
    pub fn with_decoder(decoder: Box<dyn RecordDecoder>) -> Self {
        Self { decoder }
    }

    /// Classify one record against the pin's candidate functions.
    ///
    /// Pure: identical inputs always produce the identical state. An
    /// undecodable record classifies as [`PinState::Unreadable`], never
    /// as any success state.
    pub fn classify(&self, record: &RawPinRecord, candidates: &[String]) -> PinState {
        let decoded = match self.decoder.decode(&record.raw_text) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::debug!("{} decoder rejected record: {}", self.decoder.name(), e);
                return PinState::Unreadable(e.to_string());
            }
        };

        let input = rules::RuleInput {
            decoded: &decoded,
            candidates,
        };
        for (name, rule) in rules::ORDERED {
            if let Some(state) = rule(&input) {
                log::debug!("pin {}: rule '{}' -> {}", record.soc_name, name, state);
                return state;
            }
        }
        PinState::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(raw_text: &str) -> RawPinRecord {
        RawPinRecord {
            soc_name: "soc_gpio32_pq5".to_string(),
            raw_text: raw_text.to_string(),
            source_path: PathBuf::from("/sys/kernel/debug/pinctrl/2430000.pinmux/pinmux-pins"),
        }
    }

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    const HOGGED_GPIO: &str =
        "pin 105 (SOC_GPIO32_PQ5): 2430000.pinmux (GPIO UNCLAIMED) (HOG) function rsvd0 group soc_gpio32_pq5";

    #[test]
    fn test_classify_gpio_ready() {
        let classifier = Classifier::tegra234();
        let state = classifier.classify(&record(HOGGED_GPIO), &candidates(&["extperiph3"]));
        assert_eq!(state, PinState::GpioReady);
    }

    #[test]
    fn test_classify_gpio_claimed_never_ready() {
        // The core ordering property: GPIO function plus a claiming driver
        // must come out as configured-but-unused.
        let classifier = Classifier::tegra234();
        let raw =
            "pin 105 (SOC_GPIO32_PQ5): 2430000.pinmux tegra234-gpio:453 function rsvd0 group soc_gpio32_pq5";
        let state = classifier.classify(&record(raw), &[]);
        assert_eq!(state, PinState::GpioConfiguredUnused);
    }

    #[test]
    fn test_classify_known_alt_function() {
        let classifier = Classifier::tegra234();
        let raw =
            "pin 128 (SPI1_MOSI_PZ5): 3210000.spi (GPIO UNCLAIMED) function spi1 group spi1_mosi_pz5";
        let state = classifier.classify(&record(raw), &candidates(&["spi1"]));
        assert_eq!(state, PinState::AltFunction("spi1".to_string()));
    }

    #[test]
    fn test_classify_unknown_alt_function_surfaces_name() {
        let classifier = Classifier::tegra234();
        let raw =
            "pin 105 (SOC_GPIO32_PQ5): 2430000.pinmux (GPIO UNCLAIMED) function spi1_mosi group soc_gpio32_pq5";
        let state = classifier.classify(&record(raw), &candidates(&["extperiph3"]));
        assert_eq!(state, PinState::AltFunction("spi1_mosi".to_string()));
    }

    #[test]
    fn test_classify_unconfigured_not_found() {
        let classifier = Classifier::tegra234();
        let raw = "pin 105 (SOC_GPIO32_PQ5): (MUX UNCLAIMED) (GPIO UNCLAIMED)";
        let state = classifier.classify(&record(raw), &candidates(&["extperiph3"]));
        assert_eq!(state, PinState::NotFound);
    }

    #[test]
    fn test_classify_garbage_unreadable() {
        let classifier = Classifier::tegra234();
        let state = classifier.classify(&record("REGDUMP 0x2430090=0x54"), &[]);
        match state {
            PinState::Unreadable(reason) => assert!(reason.contains("REGDUMP")),
            other => panic!("expected Unreadable, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_deterministic() {
        let classifier = Classifier::tegra234();
        let rec = record(HOGGED_GPIO);
        let cands = candidates(&["extperiph3"]);
        let first = classifier.classify(&rec, &cands);
        for _ in 0..10 {
            assert_eq!(classifier.classify(&rec, &cands), first);
        }
    }
}
