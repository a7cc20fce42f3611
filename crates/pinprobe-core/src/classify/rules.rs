//! Ordered classification rules
//!
//! The decision order is the correctness contract of the classifier: a
//! decoded record is matched against each rule in turn and the first rule
//! that produces a state wins. Keeping the rules as a flat named list
//! makes the order visible and lets each rule be tested on its own.
//!
//! A pad can show a GPIO-capable function assignment and still be held by
//! a kernel driver; the gpio-function rule's two-part check is what keeps
//! "ready to use" distinct from "configured but inaccessible".

use super::decode::DecodedRecord;
use super::{PinState, GPIO_FUNCTION_MARKERS};

/// Inputs every rule sees
pub(super) struct RuleInput<'a> {
    /// Decoded record under classification
    pub decoded: &'a DecodedRecord,
    /// Candidate peripheral function names from the pin table (lowercase)
    pub candidates: &'a [String],
}

/// A single rule; `None` means "no opinion, ask the next rule"
pub(super) type Rule = fn(&RuleInput<'_>) -> Option<PinState>;

/// The rules, in decision order. Records that fall through every rule
/// classify as `NotFound`.
pub(super) const ORDERED: &[(&str, Rule)] = &[
    ("gpio-function", gpio_function),
    ("candidate-function", candidate_function),
    ("foreign-function", foreign_function),
];

/// Whether a function name selects the pad's GPIO path
pub(super) fn is_gpio_marker(function: &str) -> bool {
    GPIO_FUNCTION_MARKERS
        .iter()
        .any(|m| m.eq_ignore_ascii_case(function))
}

/// Whether a kernel driver (other than a boot-time hog) holds the pad.
///
/// A hog leaves the mux owned by the pin controller itself, which is the
/// normal resting state of a GPIO-routed pad; any other mux owner, or a
/// claimed GPIO line, means something else grabbed it.
pub(super) fn claimed_by_driver(decoded: &DecodedRecord) -> bool {
    decoded.gpio_owner.is_some() || (decoded.mux_owner.is_some() && !decoded.hogged)
}

/// GPIO-routed pads: ready if unclaimed, otherwise configured-but-unused
fn gpio_function(input: &RuleInput<'_>) -> Option<PinState> {
    let function = input.decoded.function.as_deref()?;
    if !is_gpio_marker(function) {
        return None;
    }
    if claimed_by_driver(input.decoded) {
        Some(PinState::GpioConfiguredUnused)
    } else {
        Some(PinState::GpioReady)
    }
}

/// Pads routed to a function the pin table knows about
fn candidate_function(input: &RuleInput<'_>) -> Option<PinState> {
    let function = input.decoded.function.as_deref()?;
    if is_gpio_marker(function) {
        return None;
    }
    input
        .candidates
        .iter()
        .find(|c| c.eq_ignore_ascii_case(function))
        .map(|c| PinState::AltFunction(c.clone()))
}

/// Pads routed to a function the table does not know: surface the literal
/// decoded name so the user can correlate against vendor datasheets.
fn foreign_function(input: &RuleInput<'_>) -> Option<PinState> {
    let function = input.decoded.function.as_deref()?;
    if is_gpio_marker(function) {
        return None;
    }
    Some(PinState::AltFunction(function.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(function: Option<&str>, mux_owner: Option<&str>, hogged: bool) -> DecodedRecord {
        DecodedRecord {
            pad_name: "SOC_GPIO32_PQ5".to_string(),
            function: function.map(str::to_string),
            group: None,
            mux_owner: mux_owner.map(str::to_string),
            gpio_owner: None,
            hogged,
        }
    }

    #[test]
    fn test_gpio_function_rule_ready() {
        let decoded = record(Some("rsvd0"), Some("2430000.pinmux"), true);
        let input = RuleInput {
            decoded: &decoded,
            candidates: &[],
        };
        assert_eq!(gpio_function(&input), Some(PinState::GpioReady));
    }

    #[test]
    fn test_gpio_function_rule_claimed() {
        // GPIO function routed but a driver holds the mux: never ready.
        let decoded = record(Some("rsvd0"), Some("3100000.serial"), false);
        let input = RuleInput {
            decoded: &decoded,
            candidates: &[],
        };
        assert_eq!(gpio_function(&input), Some(PinState::GpioConfiguredUnused));
    }

    #[test]
    fn test_gpio_function_rule_claimed_gpio_line() {
        let mut decoded = record(Some("gp"), Some("2430000.pinmux"), true);
        decoded.gpio_owner = Some("tegra234-gpio:453".to_string());
        let input = RuleInput {
            decoded: &decoded,
            candidates: &[],
        };
        assert_eq!(gpio_function(&input), Some(PinState::GpioConfiguredUnused));
    }

    #[test]
    fn test_gpio_function_rule_ignores_peripherals() {
        let decoded = record(Some("spi1"), Some("3210000.spi"), false);
        let input = RuleInput {
            decoded: &decoded,
            candidates: &[],
        };
        assert_eq!(gpio_function(&input), None);
    }

    #[test]
    fn test_candidate_rule_matches_case_insensitive() {
        let decoded = record(Some("SPI1"), Some("3210000.spi"), false);
        let candidates = vec!["spi1".to_string()];
        let input = RuleInput {
            decoded: &decoded,
            candidates: &candidates,
        };
        assert_eq!(
            candidate_function(&input),
            Some(PinState::AltFunction("spi1".to_string()))
        );
    }

    #[test]
    fn test_candidate_rule_no_partial_match() {
        let decoded = record(Some("spi1_mosi"), Some("3210000.spi"), false);
        let candidates = vec!["spi1".to_string()];
        let input = RuleInput {
            decoded: &decoded,
            candidates: &candidates,
        };
        assert_eq!(candidate_function(&input), None);
    }

    #[test]
    fn test_foreign_rule_preserves_literal_name() {
        let decoded = record(Some("extperiph3"), Some("2430000.pinmux"), false);
        let input = RuleInput {
            decoded: &decoded,
            candidates: &[],
        };
        assert_eq!(
            foreign_function(&input),
            Some(PinState::AltFunction("extperiph3".to_string()))
        );
    }

    #[test]
    fn test_no_function_falls_through_all_rules() {
        let decoded = record(None, None, false);
        let input = RuleInput {
            decoded: &decoded,
            candidates: &[],
        };
        for (name, rule) in ORDERED {
            assert_eq!(rule(&input), None, "rule {} should pass", name);
        }
    }
}
